//! # ClassyFYed API
//!
//! Backend for a student-verification and campus marketplace application.
//! Users register with a declared college, prove control of their email
//! address with a one-time code, and are verified automatically when their
//! email domain is on the college's accepted list — otherwise they upload an
//! ID document and wait for manual review by an admin or college reviewer.
//!
//! ## Verification state machine
//!
//! ```text
//! register ──► OTP pending ──confirm──► domain match? ──yes──► verified
//!                  │                        │
//!                  └─ re-issue (60s         └─no──► ID upload ──► manual
//!                     cooldown)                     review (admin/college)
//! ```
//!
//! ## Architecture
//!
//! Feature modules each carry a `controller` (HTTP handlers), `service`
//! (business logic), `model` (entities and DTOs), and `router`:
//!
//! ```text
//! src/
//! ├── config/          # Env-driven configuration (JWT, SMTP, database, CORS)
//! ├── middleware/      # Bearer-token extractor and role gate
//! ├── modules/
//! │   ├── auth/        # Registration, OTP lifecycle, login
//! │   ├── verification/# Manual override and ID upload
//! │   ├── colleges/    # College catalog
//! │   ├── products/    # Marketplace products
//! │   └── users/       # User entity and roles
//! ├── store/           # Document-store ports + Postgres/in-memory adapters
//! └── utils/           # Errors, JWT, password hashing, email, OTP codes
//! ```
//!
//! Collaborators (store, mailer, file storage) are trait objects constructed
//! once in [`state::init_app_state`] and injected; nothing reaches for
//! global state.
//!
//! ## Security notes
//!
//! - Passwords are stored as bcrypt hashes and compared in constant time.
//! - Tokens are HS256 JWTs with a 1-hour expiry carrying `{user_id, role}`.
//! - Roles are a closed enum; the gate matches exhaustively.

pub mod config;
pub mod docs;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod store;
pub mod utils;
pub mod validator;
