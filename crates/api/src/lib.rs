// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::{
    ApiError, format_timestamp, translate_core_error, translate_domain_error, translate_form_status,
    translate_service_fault,
};
pub use handlers::{
    cancel_update, enter_update, form_status_response, parse_search_request, search, session_view,
    set_rank, submit,
};
pub use request_response::{
    CourseRankView, FormStatusResponse, SearchRequest, SessionView, SetRankRequest, SubmitResponse,
};
