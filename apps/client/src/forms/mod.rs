// Forms: declarative per-field validation, snapshot diffing, and the
// concrete forms built on them (sign-in, sign-up, edit profile, job posting).

pub mod auth;
pub mod diff;
pub mod job_form;
pub mod profile;
pub mod validation;

pub use diff::{diff, FormSnapshot, Patch};
pub use validation::{FieldErrors, FieldSpec, FormSchema, FormState};
