//! Service information read from the `[info]` config section.

use axum::{extract::State, Json};
use tracing::debug;

use common::types::ContactInfo;

use crate::state::ServerState;

#[utoipa::path(get, path = "/api/build-info", tag = "info", responses((status = 200, description = "Build version", body = String)))]
pub async fn build_info(State(state): State<ServerState>) -> String {
    state.config.info.build_version.clone()
}

#[utoipa::path(get, path = "/api/message", tag = "info", responses((status = 200, description = "Configured message", body = String)))]
pub async fn message(State(state): State<ServerState>) -> String {
    state.config.info.message.clone()
}

#[utoipa::path(get, path = "/api/contact-info", tag = "info", responses((status = 200, description = "Support contact", body = crate::openapi::ContactInfoDoc)))]
pub async fn contact_info(State(state): State<ServerState>) -> Json<ContactInfo> {
    debug!("Invoked Loans contact-info API");
    let c = &state.config.info.contact;
    Json(ContactInfo { name: c.name.clone(), email: c.email.clone(), on_call_support: c.on_call_support.clone() })
}
