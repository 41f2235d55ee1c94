// Account endpoints. Both return the token the server issued for the user.
impl ApiClient {
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<AuthSession> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(ApiError::Validation(
                "Email and password are required".to_string(),
            ));
        }

        let url = self.users_endpoint("login/");
        let builder = self
            .request(Method::POST, &url)
            .json(&LoginRequest { email, password });
        let response: AuthResponse = self.send_json("login", builder).await?;
        session_from_response(response, email)
    }

    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> ApiResult<AuthSession> {
        let username = username.trim();
        let email = email.trim();
        if username.is_empty() || email.is_empty() {
            return Err(ApiError::Validation(
                "Username and email are required".to_string(),
            ));
        }
        if password.chars().count() < 8 {
            return Err(ApiError::Validation(
                "Password must be at least 8 characters".to_string(),
            ));
        }

        let url = self.users_endpoint("register/");
        let builder = self.request(Method::POST, &url).json(&RegisterRequest {
            username,
            email,
            password,
        });
        let response: AuthResponse = self.send_json("register", builder).await?;
        session_from_response(response, email)
    }
}

fn session_from_response(response: AuthResponse, email: &str) -> ApiResult<AuthSession> {
    let token = response
        .token
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ApiError::Decode("response did not include a token".to_string()))?;
    let email = response
        .user
        .and_then(|u| u.email)
        .unwrap_or_else(|| email.to_string());
    Ok(AuthSession {
        token,
        email: Some(email),
    })
}
