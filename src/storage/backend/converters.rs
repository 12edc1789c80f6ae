use crate::storage::Link;
use migration::entities::link;

pub fn model_to_link(model: link::Model) -> Link {
    Link {
        id: model.id,
        short_code: model.short_code,
        original_url: model.original_url,
        created_at: model.created_at,
    }
}

pub fn link_to_active_model(link: &Link) -> link::ActiveModel {
    use sea_orm::ActiveValue::Set;

    link::ActiveModel {
        id: Set(link.id.clone()),
        short_code: Set(link.short_code.clone()),
        original_url: Set(link.original_url.clone()),
        created_at: Set(link.created_at),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::ActiveValue;

    fn test_model() -> link::Model {
        link::Model {
            id: "550e8400-e29b-41d4-a716-446655440000".to_string(),
            short_code: "abc123".to_string(),
            original_url: "https://example.com".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_model_to_link() {
        let model = test_model();
        let expected_id = model.id.clone();
        let expected_code = model.short_code.clone();

        let link = model_to_link(model);

        assert_eq!(link.id, expected_id);
        assert_eq!(link.short_code, expected_code);
        assert_eq!(link.original_url, "https://example.com");
    }

    #[test]
    fn test_link_to_active_model_sets_all_fields() {
        let link = model_to_link(test_model());
        let active = link_to_active_model(&link);

        assert!(matches!(active.id, ActiveValue::Set(_)));
        assert!(matches!(active.short_code, ActiveValue::Set(_)));
        assert!(matches!(active.original_url, ActiveValue::Set(_)));
        assert!(matches!(active.created_at, ActiveValue::Set(_)));

        if let ActiveValue::Set(code) = active.short_code {
            assert_eq!(code, link.short_code);
        }
    }
}
