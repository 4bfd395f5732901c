use config::gateway_config::GatewayConfig;
use reqwest::RequestBuilder;
use std::path::Path;
use std::sync::Arc;
use utility::{Error, Result};

/// secret file names read from the secret mount for basic auth
pub const BASIC_AUTH_USER_FILE: &str = "basic-auth-user";
pub const BASIC_AUTH_PASSWORD_FILE: &str = "basic-auth-password";

///AuthInjector attaches credentials to an outgoing request to the provider.
// implement this interface to add another authentication strategy
pub trait AuthInjector: Send + Sync {
    fn inject(&self, req: RequestBuilder) -> Result<RequestBuilder>;
}

///sends requests untouched
#[derive(Clone, Debug, Default)]
pub struct NoAuth;

///basic authentication type
#[derive(Clone, Debug)]
pub struct BasicAuth {
    pub username: String,
    pub password: String,
}

///bearer token
#[derive(Clone, Debug)]
pub struct BearerToken {
    token: String,
}

impl AuthInjector for NoAuth {
    fn inject(&self, req: RequestBuilder) -> Result<RequestBuilder> {
        Ok(req)
    }
}

impl AuthInjector for BasicAuth {
    fn inject(&self, req: RequestBuilder) -> Result<RequestBuilder> {
        Ok(req.basic_auth(self.username.as_str(), Some(self.password.as_str())))
    }
}

impl AuthInjector for BearerToken {
    fn inject(&self, req: RequestBuilder) -> Result<RequestBuilder> {
        Ok(req.bearer_auth(self.token.as_str()))
    }
}

impl BasicAuth {
    pub fn new(username: &str, password: &str) -> BasicAuth {
        BasicAuth {
            username: username.into(),
            password: password.into(),
        }
    }

    ///reads basic-auth-user and basic-auth-password from a secret mount
    pub fn from_secret_mount(mount_path: &Path) -> Result<BasicAuth> {
        let username = read_secret(mount_path, BASIC_AUTH_USER_FILE)?;
        let password = read_secret(mount_path, BASIC_AUTH_PASSWORD_FILE)?;
        if username.is_empty() {
            return Err(Error::Custom(format!(
                "{} in {} is empty",
                BASIC_AUTH_USER_FILE,
                mount_path.to_string_lossy()
            )));
        }
        Ok(BasicAuth { username, password })
    }
}

impl BearerToken {
    pub fn new(token: &str) -> BearerToken {
        BearerToken {
            token: token.into(),
        }
    }
}

fn read_secret(mount_path: &Path, name: &str) -> Result<String> {
    let file = mount_path.join(name);
    let data = std::fs::read_to_string(&file).map_err(|e| {
        Error::Custom(format!(
            "unable to read secret {}: {}",
            file.to_string_lossy(),
            e
        ))
    })?;
    Ok(data.trim().to_string())
}

///returns the injector described by the config, None when auth is disabled
pub fn auth_from_config(config: &GatewayConfig) -> Result<Option<Arc<dyn AuthInjector>>> {
    if config.basic_auth {
        let auth = BasicAuth::from_secret_mount(&config.secret_mount_path())?;
        Ok(Some(Arc::new(auth)))
    } else {
        Ok(None)
    }
}
