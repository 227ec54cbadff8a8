// ABOUTME: Minimal Twilio REST client
// ABOUTME: Account listing and Verify rate limit listing used for credential checks

pub mod client;
pub mod error;

pub use client::{Account, RateLimit, TwilioClient, TwilioEndpoints};
pub use error::{TwilioError, TwilioErrorBody};
