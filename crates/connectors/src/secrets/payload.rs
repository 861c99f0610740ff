use crate::secrets::error::SecretFormatError;
use model::execution::connection::ConnectionProfile;
use serde_json::{Map, Value as JsonValue};

/// Parses the structured secret payload: a JSON object with string fields
/// `username`, `password`, `host`, `dbname` and a `port` that may be numeric
/// or a numeric string.
pub(crate) fn parse_connection_profile(
    raw: &str,
) -> Result<ConnectionProfile, SecretFormatError> {
    let payload: JsonValue = serde_json::from_str(raw)
        .map_err(|err| SecretFormatError::InvalidJson(err.to_string()))?;
    let object = payload
        .as_object()
        .ok_or_else(|| SecretFormatError::InvalidJson("payload is not an object".to_string()))?;

    Ok(ConnectionProfile {
        user: require_string(object, "username")?,
        password: require_string(object, "password")?,
        host: require_string(object, "host")?,
        port: require_port(object)?,
        database: require_string(object, "dbname")?,
    })
}

fn require_string(
    object: &Map<String, JsonValue>,
    key: &'static str,
) -> Result<String, SecretFormatError> {
    match object.get(key) {
        None => Err(SecretFormatError::MissingKey(key)),
        Some(JsonValue::String(value)) => Ok(value.clone()),
        Some(_) => Err(SecretFormatError::WrongType {
            key,
            expected: "string",
        }),
    }
}

fn require_port(object: &Map<String, JsonValue>) -> Result<u16, SecretFormatError> {
    let value = object.get("port").ok_or(SecretFormatError::MissingKey("port"))?;
    let port = match value {
        JsonValue::Number(number) => number
            .as_u64()
            .ok_or_else(|| SecretFormatError::PortOutOfRange(number.to_string()))?,
        JsonValue::String(text) => text
            .trim()
            .parse::<u64>()
            .map_err(|_| SecretFormatError::WrongType {
                key: "port",
                expected: "number or numeric string",
            })?,
        _ => {
            return Err(SecretFormatError::WrongType {
                key: "port",
                expected: "number or numeric string",
            });
        }
    };
    u16::try_from(port).map_err(|_| SecretFormatError::PortOutOfRange(port.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"{
        "username": "loader",
        "password": "qwerty123",
        "host": "db.internal",
        "port": 5432,
        "dbname": "loads"
    }"#;

    #[test]
    fn parses_complete_payload() {
        let profile = parse_connection_profile(PAYLOAD).unwrap();
        assert_eq!(profile.user, "loader");
        assert_eq!(profile.host, "db.internal");
        assert_eq!(profile.port, 5432);
        assert_eq!(profile.database, "loads");
    }

    #[test]
    fn accepts_port_as_numeric_string() {
        let raw = PAYLOAD.replace("5432", "\"5432\"");
        let profile = parse_connection_profile(&raw).unwrap();
        assert_eq!(profile.port, 5432);
    }

    #[test]
    fn missing_password_is_reported_by_key() {
        let raw = r#"{"username":"u","host":"h","port":1,"dbname":"d"}"#;
        assert_eq!(
            parse_connection_profile(raw).unwrap_err(),
            SecretFormatError::MissingKey("password")
        );
    }

    #[test]
    fn mistyped_username_is_rejected() {
        let raw = r#"{"username":1,"password":"p","host":"h","port":1,"dbname":"d"}"#;
        assert_eq!(
            parse_connection_profile(raw).unwrap_err(),
            SecretFormatError::WrongType {
                key: "username",
                expected: "string"
            }
        );
    }

    #[test]
    fn port_above_range_is_rejected() {
        let raw = PAYLOAD.replace("5432", "70000");
        assert!(matches!(
            parse_connection_profile(&raw).unwrap_err(),
            SecretFormatError::PortOutOfRange(_)
        ));
    }

    #[test]
    fn non_object_payload_is_rejected() {
        assert!(matches!(
            parse_connection_profile("[1,2]").unwrap_err(),
            SecretFormatError::InvalidJson(_)
        ));
    }
}
