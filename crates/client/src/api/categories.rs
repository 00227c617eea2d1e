use http::Method;
use shared::{
    api::{payloads::DeleteConfirmation, Object},
    model::{Category, NewCategory},
};

use super::{Api, Transport};
use crate::error::ClientError;

impl<T: Transport> Api<T> {
    /// Categories of the user. The server answers 404 for a user without any,
    /// which is returned as an empty list
    pub async fn fetch_categories(&self, user_id: &str) -> Result<Vec<Category>, ClientError> {
        match self
            .request(Method::GET, &Object::CategoryId.with_id(user_id), None::<&()>)
            .await
        {
            Err(e) if e.is_not_found() => Ok(vec![]),
            r => r,
        }
    }

    pub async fn create_category(&self, name: &str, user_id: &str) -> Result<Category, ClientError> {
        let new_category = NewCategory::new(name, user_id);
        self.request(Method::POST, Object::Category.path(), Some(&new_category))
            .await
    }

    pub async fn delete_category(&self, id: i64) -> Result<DeleteConfirmation, ClientError> {
        self.request(Method::DELETE, &Object::CategoryId.with_id(id), None::<&()>)
            .await
    }
}

#[cfg(test)]
mod test {
    use http::Method;
    use serde_json::json;

    use crate::api::test::{api, FakeTransport};

    #[test]
    fn test_user_without_categories_gets_empty_list() {
        let transport = FakeTransport::default();
        transport.respond(404, json!({ "error": "inner", "code": 404, "inner": "NoneFound" }));

        let categories = tokio_test::block_on(api(&transport).fetch_categories("1")).unwrap();
        assert!(categories.is_empty());
        assert_eq!(transport.last_sent().url, "http://api.test/categorias/1");
    }

    #[test]
    fn test_user_id_is_encoded_in_the_path() {
        let transport = FakeTransport::default();
        transport.respond(200, json!([]));

        tokio_test::block_on(api(&transport).fetch_categories("google/42")).unwrap();
        assert_eq!(transport.last_sent().url, "http://api.test/categorias/google%2F42");
    }

    #[test]
    fn test_create_category_sends_wire_names() {
        let transport = FakeTransport::default();
        transport.respond(201, json!({ "categoriaid": 7, "nombre": "Legs", "userid": "2" }));

        let category = tokio_test::block_on(api(&transport).create_category("Legs", "2")).unwrap();
        assert_eq!(category.id, 7);

        let sent = transport.last_sent();
        assert_eq!(sent.method, Method::POST);
        assert_eq!(sent.body, Some(json!({ "nombre": "Legs", "userid": "2" })));
    }

    #[test]
    fn test_other_failures_are_not_hidden() {
        let transport = FakeTransport::default();
        transport.respond(500, json!({ "error": "other", "message": "boom" }));

        assert!(tokio_test::block_on(api(&transport).fetch_categories("1")).is_err());
    }
}
