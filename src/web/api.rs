use axum::http::StatusCode;
use axum::response::Response;
use serde::{Deserialize, Serialize};

use crate::tos;

pub type OutAny = Out<serde_json::Value>;

/// Uniform response envelope of every list/detail endpoint.
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Out<T: Serialize> {
    pub is_success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
}

impl<T: Serialize> Out<T> {
    pub fn ok(result: T) -> Self {
        Out { is_success: true, message: None, result: Some(result) }
    }

    pub fn okay() -> Self {
        Out { is_success: true, message: None, result: None }
    }

    pub fn fail(message: impl ToString) -> Self {
        Out { is_success: false, message: tos!(message), result: None }
    }

    pub fn from_erx(erx: crate::erx::Erx) -> Self {
        Out { is_success: false, message: tos!(erx.description()), result: None }
    }
}

impl<T: Serialize> axum::response::IntoResponse for Out<T> {
    fn into_response(self) -> Response {
        let body = serde_json::to_string(&self);
        const API_HEADERS: [(&str, &str); 1] = [("Content-Type", "application/json")];

        match body {
            Ok(body) => {
                let status = StatusCode::OK;
                (status, API_HEADERS, body).into_response()
            },
            Err(err) => {
                let status = StatusCode::INTERNAL_SERVER_ERROR;

                let body = Out::<()>::fail(err.to_string());
                let body = serde_json::to_string(&body).unwrap_or(String::from("json serialization error"));
                (status, API_HEADERS, body).into_response()
            },
        }
    }
}
