//! Application layer for linuxkey-sender.
//!
//! Decides what a form submission means (reject, ask again, or forward) and
//! renders the HTML page.  Sending and HTTP framing belong to the
//! infrastructure layer.

pub mod relay_service;

pub use relay_service::{
    failed_status, html_escape, render_page, review_submission, sent_status, Submission,
    EMPTY_TEXT_STATUS,
};
