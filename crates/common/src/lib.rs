pub mod types;
pub mod utils;
pub mod constants;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }

    #[test]
    fn response_dto_uses_camel_case() {
        let dto = types::ResponseDto::new(constants::STATUS_201, constants::MESSAGE_201);
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["statusCode"], "201");
        assert_eq!(json["statusMsg"], "Loan created successfully");
    }
}
