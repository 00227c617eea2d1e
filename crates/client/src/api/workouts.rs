use chrono::NaiveDate;
use http::Method;
use shared::{
    api::{payloads::DeleteConfirmation, Object},
    model::{NewWorkout, Workout},
};

use super::{Api, Transport};
use crate::error::ClientError;

impl<T: Transport> Api<T> {
    pub async fn fetch_workouts(&self, category_id: i64) -> Result<Vec<Workout>, ClientError> {
        self.request(Method::GET, &Object::WorkoutId.with_id(category_id), None::<&()>)
            .await
    }

    pub async fn create_workout(
        &self,
        name: &str,
        date: NaiveDate,
        category_id: i64,
    ) -> Result<Workout, ClientError> {
        let new_workout = NewWorkout::new(name, date, category_id);
        self.request(Method::POST, Object::Workout.path(), Some(&new_workout))
            .await
    }

    pub async fn delete_workout(&self, id: i64) -> Result<DeleteConfirmation, ClientError> {
        self.request(Method::DELETE, &Object::WorkoutId.with_id(id), None::<&()>)
            .await
    }
}

#[cfg(test)]
mod test {
    use chrono::NaiveDate;
    use http::Method;
    use serde_json::json;

    use crate::api::test::{api, FakeTransport};

    #[test]
    fn test_create_workout() {
        let transport = FakeTransport::default();
        transport.respond(
            201,
            json!({ "entrenamientoid": 3, "nombre": "", "fecha": "2024-05-06", "categoriaid": 2 }),
        );

        let date = NaiveDate::from_ymd_opt(2024, 5, 6).unwrap();
        let workout = tokio_test::block_on(api(&transport).create_workout("", date, 2)).unwrap();
        assert_eq!(workout.id, 3);
        assert_eq!(workout.date, date);
        assert_eq!(
            transport.last_sent().body,
            Some(json!({ "nombre": "", "fecha": "2024-05-06", "categoriaid": 2 }))
        );
    }

    #[test]
    fn test_delete_workout() {
        let transport = FakeTransport::default();
        transport.respond(200, json!({ "message": "Workout deleted" }));

        let confirmation = tokio_test::block_on(api(&transport).delete_workout(3)).unwrap();
        assert_eq!(confirmation.message, "Workout deleted");

        let sent = transport.last_sent();
        assert_eq!(sent.method, Method::DELETE);
        assert_eq!(sent.url, "http://api.test/entrenamientos/3");
        assert_eq!(sent.body, None);
    }
}
