//! Data types exchanged with the Petstore API.

mod oauth_scope;
mod oauth_token;
mod order;
mod pet;
mod status;
mod user;

pub use oauth_scope::{join_scopes, OAuthScope};
pub use oauth_token::OAuthToken;
pub use order::Order;
pub use pet::{Category, Pet, Tag};
pub use status::{OrderStatus, PetStatus};
pub use user::{ApiResponse, User};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pet_serialization() {
        let pet = Pet::new("doggie", vec!["https://img/1.png".to_string()])
            .with_id(10)
            .with_status(PetStatus::Available);

        let json = serde_json::to_value(&pet).unwrap();
        assert_eq!(json["name"], "doggie");
        assert_eq!(json["photoUrls"][0], "https://img/1.png");
        assert_eq!(json["status"], "available");
        assert!(json.get("category").is_none());
    }

    #[test]
    fn test_order_deserialization() {
        let json = r#"{"id":1,"petId":10,"quantity":2,"shipDate":"2024-01-02T03:04:05Z","status":"placed","complete":false}"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.pet_id, Some(10));
        assert_eq!(order.status, Some(OrderStatus::Placed));
        assert_eq!(
            order.ship_date.map(|d| d.timestamp()),
            Some(1_704_164_645)
        );
    }

    #[test]
    fn test_api_response_type_field() {
        let resp: ApiResponse =
            serde_json::from_str(r#"{"code":200,"type":"unknown","message":"ok"}"#).unwrap();
        assert_eq!(resp.kind.as_deref(), Some("unknown"));
    }
}
