use super::ApiClient;
use crate::core::{RegisterRequest, Role, User, UserId};
use crate::error::Result;

/// `/admin` endpoints; the server rejects callers that are not admins
pub struct AdminApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AdminApi<'a> {
    pub(super) const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn users(&self) -> Result<Vec<User>> {
        self.client.get_json("admin/users", &[]).await
    }

    pub async fn create_user(&self, request: &RegisterRequest) -> Result<User> {
        self.client.post_json("admin/users", request).await
    }

    pub async fn update_role(&self, id: UserId, role: Role) -> Result<User> {
        self.client
            .put_query(&format!("admin/users/{id}/role"), &[("role", role.as_str())])
            .await
    }

    pub async fn delete_user(&self, id: UserId) -> Result<()> {
        self.client.delete(&format!("admin/users/{id}")).await
    }

    pub async fn users_by_role(&self, role: Role) -> Result<Vec<User>> {
        self.client
            .get_json(&format!("admin/users/role/{}", role.as_str()), &[])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HelpdeskError;
    use httpmock::prelude::*;
    use serde_json::json;
    use std::time::Duration;

    fn client(server: &MockServer) -> ApiClient {
        ApiClient::new(&server.url("/api"), Duration::from_secs(5))
            .unwrap()
            .with_token("admin-tok")
    }

    #[tokio::test]
    async fn test_user_listing() {
        let server = MockServer::start_async().await;
        let all = server
            .mock_async(|when, then| {
                when.method(GET).path("/api/admin/users");
                then.status(200).json_body(json!([
                    {"id": 1, "email": "a@example.com", "name": "A", "role": "ADMIN"},
                    {"id": 2, "email": "b@example.com", "name": "B", "role": "SUPPORT_AGENT"}
                ]));
            })
            .await;
        let agents = server
            .mock_async(|when, then| {
                when.method(GET).path("/api/admin/users/role/SUPPORT_AGENT");
                then.status(200).json_body(json!([
                    {"id": 2, "email": "b@example.com", "name": "B", "role": "SUPPORT_AGENT"}
                ]));
            })
            .await;

        let client = client(&server);
        assert_eq!(client.admin().users().await.unwrap().len(), 2);
        let found = client.admin().users_by_role(Role::SupportAgent).await.unwrap();
        assert_eq!(found[0].role, Role::SupportAgent);

        all.assert_async().await;
        agents.assert_async().await;
    }

    #[tokio::test]
    async fn test_update_role_uses_query_param() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(PUT)
                    .path("/api/admin/users/2/role")
                    .query_param("role", "ADMIN");
                then.status(200)
                    .json_body(json!({"id": 2, "email": "b@example.com", "name": "B", "role": "ADMIN"}));
            })
            .await;

        let user = client(&server).admin().update_role(2, Role::Admin).await.unwrap();
        mock.assert_async().await;
        assert_eq!(user.role, Role::Admin);
    }

    #[tokio::test]
    async fn test_create_and_delete() {
        let server = MockServer::start_async().await;
        let create = server
            .mock_async(|when, then| {
                when.method(POST).path("/api/admin/users").json_body(json!({
                    "email": "c@example.com", "password": "pw", "name": "C", "role": "USER"
                }));
                then.status(200)
                    .json_body(json!({"id": 3, "email": "c@example.com", "name": "C", "role": "USER"}));
            })
            .await;
        let delete = server
            .mock_async(|when, then| {
                when.method(DELETE).path("/api/admin/users/3");
                then.status(204);
            })
            .await;

        let client = client(&server);
        let user = client
            .admin()
            .create_user(&RegisterRequest {
                email: "c@example.com".into(),
                password: "pw".into(),
                name: "C".into(),
                role: Some(Role::User),
            })
            .await
            .unwrap();
        assert_eq!(user.id, 3);
        client.admin().delete_user(3).await.unwrap();

        create.assert_async().await;
        delete.assert_async().await;
    }

    #[tokio::test]
    async fn test_forbidden_for_non_admin() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/admin/users");
                then.status(403).body("");
            })
            .await;

        let err = client(&server).admin().users().await.unwrap_err();
        assert!(matches!(err, HelpdeskError::Forbidden(_)));
    }
}
