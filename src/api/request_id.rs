use uuid::Uuid;

/// HTTP header carrying the per-request correlation id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Fresh correlation id for one recommendation request
pub fn new_request_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_ids_are_unique_uuids() {
        let first = new_request_id();
        let second = new_request_id();

        assert_ne!(first, second);
        assert!(Uuid::parse_str(&first).is_ok());
    }
}
