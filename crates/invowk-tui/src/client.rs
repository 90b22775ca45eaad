//! TUI sidecar client: environment-based discovery plus one call per
//! component tag.
//!
//! `from_environment` and the explicit `with(address, token)` constructor
//! mirror each other so a child process can either inherit the sidecar
//! from its environment or be pointed at one directly for testing.

use crate::protocol::{
    ChooseRequest, ChooseResult, ComponentTag, ConfirmRequest, ConfirmResult, FileRequest,
    FileResult, FilterRequest, FilterResult, InputRequest, InputResult, PagerRequest,
    PagerResult, Request, Response, SpinRequest, SpinResult, TableRequest, TableResult,
    TextareaRequest, TextareaResult, WriteRequest, WriteResult,
};
use invowk_errors::InvowkErrorKind;
use std::time::Duration;

pub const ADDR_ENV_VAR: &str = "INVOWK_TUI_ADDR";
pub const TOKEN_ENV_VAR: &str = "INVOWK_TUI_TOKEN";

const CLIENT_TIMEOUT: Duration = Duration::from_secs(600);

pub struct TuiClient {
    address: String,
    token: String,
    http: reqwest::blocking::Client,
}

impl TuiClient {
    pub fn with(address: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            token: token.into(),
            http: reqwest::blocking::Client::builder()
                .timeout(CLIENT_TIMEOUT)
                .build()
                .expect("reqwest client builder with static config must not fail"),
        }
    }

    /// Discovers the sidecar from `INVOWK_TUI_ADDR`/`INVOWK_TUI_TOKEN` in
    /// the current process's environment. `None` if either is unset.
    pub fn from_environment() -> Option<Self> {
        let address = std::env::var(ADDR_ENV_VAR).ok()?;
        let token = std::env::var(TOKEN_ENV_VAR).ok()?;
        Some(Self::with(address, token))
    }

    pub fn is_available(&self) -> bool {
        let url = format!("{}/health", self.address);
        self.http
            .get(url)
            .send()
            .map(|response| response.status().is_success())
            .unwrap_or(false)
    }

    fn call(&self, component: ComponentTag, options: serde_json::Value) -> Result<serde_json::Value, InvowkErrorKind> {
        let request = Request {
            component: component.as_str().to_string(),
            options,
        };
        let url = format!("{}/tui", self.address);
        let http_response = self
            .http
            .post(url)
            .bearer_auth(&self.token)
            .json(&request)
            .send()
            .map_err(|err| InvowkErrorKind::Io(std::io::Error::other(err.to_string())))?;

        if http_response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(InvowkErrorKind::InvalidAuthToken);
        }

        let response: Response = http_response
            .json()
            .map_err(|err| InvowkErrorKind::Io(std::io::Error::other(err.to_string())))?;

        if let Some(message) = response.error {
            return Err(InvowkErrorKind::InvalidComponent(message));
        }
        if response.cancelled {
            return Err(InvowkErrorKind::UserCancelled);
        }
        response
            .result
            .ok_or_else(|| InvowkErrorKind::MissingRequiredInput("tui response result".to_string()))
    }

    pub fn confirm(&self, request: ConfirmRequest) -> Result<bool, InvowkErrorKind> {
        let options = serde_json::to_value(request).map_err(|err| InvowkErrorKind::Io(std::io::Error::other(err.to_string())))?;
        let value = self.call(ComponentTag::Confirm, options)?;
        let result: ConfirmResult = serde_json::from_value(value).map_err(|err| InvowkErrorKind::Io(std::io::Error::other(err.to_string())))?;
        Ok(result.confirmed)
    }

    pub fn input(&self, request: InputRequest) -> Result<String, InvowkErrorKind> {
        let options = serde_json::to_value(request).map_err(|err| InvowkErrorKind::Io(std::io::Error::other(err.to_string())))?;
        let value = self.call(ComponentTag::Input, options)?;
        let result: InputResult = serde_json::from_value(value).map_err(|err| InvowkErrorKind::Io(std::io::Error::other(err.to_string())))?;
        Ok(result.value)
    }

    pub fn choose(&self, request: ChooseRequest) -> Result<Vec<String>, InvowkErrorKind> {
        let options = serde_json::to_value(request).map_err(|err| InvowkErrorKind::Io(std::io::Error::other(err.to_string())))?;
        let value = self.call(ComponentTag::Choose, options)?;
        let result: ChooseResult = serde_json::from_value(value).map_err(|err| InvowkErrorKind::Io(std::io::Error::other(err.to_string())))?;
        Ok(result.selected_values())
    }

    /// Convenience over [`Self::choose`] that forces a single-selection
    /// prompt (`limit = 1`, `no_limit = false`) and tolerates the server
    /// returning either a bare string or a single-element array.
    pub fn choose_single(&self, title: impl Into<String>, options: Vec<String>) -> Result<String, InvowkErrorKind> {
        let request = ChooseRequest {
            title: title.into(),
            options,
            limit: 1,
            no_limit: false,
        };
        let mut selected = self.choose(request)?;
        selected
            .pop()
            .ok_or_else(|| InvowkErrorKind::MissingRequiredInput("choose_single selection".to_string()))
    }

    pub fn filter(&self, request: FilterRequest) -> Result<String, InvowkErrorKind> {
        let options = serde_json::to_value(request).map_err(|err| InvowkErrorKind::Io(std::io::Error::other(err.to_string())))?;
        let value = self.call(ComponentTag::Filter, options)?;
        let result: FilterResult = serde_json::from_value(value).map_err(|err| InvowkErrorKind::Io(std::io::Error::other(err.to_string())))?;
        Ok(result.selected)
    }

    pub fn file(&self, request: FileRequest) -> Result<String, InvowkErrorKind> {
        let options = serde_json::to_value(request).map_err(|err| InvowkErrorKind::Io(std::io::Error::other(err.to_string())))?;
        let value = self.call(ComponentTag::File, options)?;
        let result: FileResult = serde_json::from_value(value).map_err(|err| InvowkErrorKind::Io(std::io::Error::other(err.to_string())))?;
        Ok(result.path)
    }

    pub fn write(&self, request: WriteRequest) -> Result<String, InvowkErrorKind> {
        let options = serde_json::to_value(request).map_err(|err| InvowkErrorKind::Io(std::io::Error::other(err.to_string())))?;
        let value = self.call(ComponentTag::Write, options)?;
        let result: WriteResult = serde_json::from_value(value).map_err(|err| InvowkErrorKind::Io(std::io::Error::other(err.to_string())))?;
        Ok(result.content)
    }

    pub fn textarea(&self, request: TextareaRequest) -> Result<String, InvowkErrorKind> {
        let options = serde_json::to_value(request).map_err(|err| InvowkErrorKind::Io(std::io::Error::other(err.to_string())))?;
        let value = self.call(ComponentTag::Textarea, options)?;
        let result: TextareaResult = serde_json::from_value(value).map_err(|err| InvowkErrorKind::Io(std::io::Error::other(err.to_string())))?;
        Ok(result.value)
    }

    pub fn spin(&self, request: SpinRequest) -> Result<(), InvowkErrorKind> {
        let options = serde_json::to_value(request).map_err(|err| InvowkErrorKind::Io(std::io::Error::other(err.to_string())))?;
        let value = self.call(ComponentTag::Spin, options)?;
        let _result: SpinResult = serde_json::from_value(value).map_err(|err| InvowkErrorKind::Io(std::io::Error::other(err.to_string())))?;
        Ok(())
    }

    pub fn pager(&self, request: PagerRequest) -> Result<(), InvowkErrorKind> {
        let options = serde_json::to_value(request).map_err(|err| InvowkErrorKind::Io(std::io::Error::other(err.to_string())))?;
        let value = self.call(ComponentTag::Pager, options)?;
        let _result: PagerResult = serde_json::from_value(value).map_err(|err| InvowkErrorKind::Io(std::io::Error::other(err.to_string())))?;
        Ok(())
    }

    pub fn table(&self, request: TableRequest) -> Result<Option<usize>, InvowkErrorKind> {
        let options = serde_json::to_value(request).map_err(|err| InvowkErrorKind::Io(std::io::Error::other(err.to_string())))?;
        let value = self.call(ComponentTag::Table, options)?;
        let result: TableResult = serde_json::from_value(value).map_err(|err| InvowkErrorKind::Io(std::io::Error::other(err.to_string())))?;
        Ok(result.selected_row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_environment_requires_both_vars() {
        std::env::remove_var(ADDR_ENV_VAR);
        std::env::remove_var(TOKEN_ENV_VAR);
        assert!(TuiClient::from_environment().is_none());
    }

    #[test]
    fn is_available_false_when_unreachable() {
        let client = TuiClient::with("http://127.0.0.1:1", "token");
        assert!(!client.is_available());
    }
}
