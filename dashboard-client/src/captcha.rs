//! Captcha generation and verification
//!
//! The image is an SVG rendered client-side, so this is a UI decoration and
//! not an authentication boundary. Expected codes are kept in durable storage
//! under `captcha_<token>` until the first verification attempt.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use rand::Rng;
use rand::distributions::Alphanumeric;
use std::fmt::Write;

use shared::client::CaptchaChallenge;
use shared::error::{AppError, AppResult, ErrorCode};

use crate::ClientResult;
use crate::storage::{KeyValueStore, captcha_key};

pub const CODE_LENGTH: usize = 4;
pub const WIDTH: u32 = 120;
pub const HEIGHT: u32 = 40;
const NOISE_LINES: usize = 5;
const NOISE_DOTS: usize = 50;

/// Captcha fields of a login/register/reset request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptchaAnswer<'a> {
    /// Nothing supplied
    Absent,
    /// A code without its token
    Incomplete,
    Provided { token: &'a str, code: &'a str },
}

impl<'a> CaptchaAnswer<'a> {
    pub fn from_fields(token: Option<&'a str>, code: Option<&'a str>) -> Self {
        let token = token.filter(|t| !t.is_empty());
        let code = code.filter(|c| !c.is_empty());
        match (token, code) {
            (Some(token), Some(code)) => Self::Provided { token, code },
            (None, Some(_)) => Self::Incomplete,
            _ => Self::Absent,
        }
    }
}

/// Random alphanumeric code
pub fn random_code() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(CODE_LENGTH)
        .map(char::from)
        .collect()
}

/// Opaque correlation token
pub fn new_token() -> String {
    format!("captcha-{}", uuid::Uuid::new_v4().simple())
}

/// Render a code into a distorted SVG
pub fn render_svg(code: &str) -> String {
    let mut rng = rand::thread_rng();
    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}">"#
    );
    let _ = write!(
        svg,
        r##"<rect width="{WIDTH}" height="{HEIGHT}" fill="#f8f8f8" stroke="#ddd"/>"##
    );

    for _ in 0..NOISE_LINES {
        let (x1, y1) = (
            rng.gen_range(0.0..WIDTH as f64),
            rng.gen_range(0.0..HEIGHT as f64),
        );
        let (x2, y2) = (
            rng.gen_range(0.0..WIDTH as f64),
            rng.gen_range(0.0..HEIGHT as f64),
        );
        let stroke = rng.gen_range(1.0..3.0);
        let color = random_color(&mut rng, 80, 150);
        let _ = write!(
            svg,
            r#"<line x1="{x1:.1}" y1="{y1:.1}" x2="{x2:.1}" y2="{y2:.1}" stroke="{color}" stroke-width="{stroke:.1}" stroke-opacity="0.6"/>"#
        );
    }

    for _ in 0..NOISE_DOTS {
        let cx = rng.gen_range(0.0..WIDTH as f64);
        let cy = rng.gen_range(0.0..HEIGHT as f64);
        let r = rng.gen_range(1.0..3.0);
        let color = random_color(&mut rng, 80, 180);
        let _ = write!(
            svg,
            r#"<circle cx="{cx:.1}" cy="{cy:.1}" r="{r:.1}" fill="{color}" fill-opacity="0.6"/>"#
        );
    }

    let font_size = rng.gen_range(20.0..25.0);
    for (i, glyph) in code.chars().enumerate() {
        let x = 25 + i as u32 * 22;
        let y = 28.0 + rng.gen_range(-5.0..5.0);
        let rotate = rng.gen_range(-10.0..10.0);
        let color = random_color(&mut rng, 30, 120);
        let _ = write!(
            svg,
            r#"<text x="{x}" y="{y:.1}" font-family="Arial, sans-serif" font-size="{font_size:.1}" fill="{color}" text-anchor="middle" transform="rotate({rotate:.1}, {x}, {y:.1})" font-weight="bold">{glyph}</text>"#
        );
    }

    svg.push_str("</svg>");
    svg
}

fn random_color(rng: &mut impl Rng, min: u8, max: u8) -> String {
    let r = rng.gen_range(min..=max);
    let g = rng.gen_range(min..=max);
    let b = rng.gen_range(min..=max);
    format!("rgb({r},{g},{b})")
}

/// Generate a challenge without storing it
pub fn generate() -> CaptchaChallenge {
    let code = random_code();
    let image = format!(
        "data:image/svg+xml;base64,{}",
        STANDARD.encode(render_svg(&code))
    );
    CaptchaChallenge {
        captcha_image: image,
        captcha_token: new_token(),
        captcha_code: Some(code),
    }
}

/// Generate a challenge and remember its expected code
pub fn issue(store: &dyn KeyValueStore) -> ClientResult<CaptchaChallenge> {
    let challenge = generate();
    if let Some(code) = &challenge.captcha_code {
        store.set(&captcha_key(&challenge.captcha_token), code)?;
    }
    tracing::debug!(token = %challenge.captcha_token, "Captcha issued");
    Ok(challenge)
}

/// Check a code against the stored one. The stored code is consumed on
/// every attempt, successful or not.
pub fn verify(store: &dyn KeyValueStore, token: &str, code: &str) -> AppResult<()> {
    let key = captcha_key(token);
    let expected = store
        .get(&key)
        .map_err(|e| AppError::storage(e.to_string()))?;
    store
        .remove(&key)
        .map_err(|e| AppError::storage(e.to_string()))?;

    match expected {
        None => Err(AppError::new(ErrorCode::CaptchaExpired)),
        Some(expected) if expected.eq_ignore_ascii_case(code) => Ok(()),
        Some(_) => Err(AppError::new(ErrorCode::InvalidCaptcha)),
    }
}
