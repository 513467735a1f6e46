use axum::extract::{Extension, Path};
use serde::Serialize;

use crate::auth::Principal;
use crate::locale::LayoutAttributes;
use crate::middleware::ApiResponse;

/// Provider context shared by every page
#[derive(Debug, Serialize)]
pub struct ShellView {
    pub layout: LayoutAttributes,
    pub principal: Option<Principal>,
}

pub async fn layout_get(
    Path(locale): Path<String>,
    Extension(principal): Extension<Option<Principal>>,
) -> ApiResponse<ShellView> {
    ApiResponse::success(ShellView {
        layout: LayoutAttributes::for_locale(&locale),
        principal,
    })
}
