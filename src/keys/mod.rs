//! Key material: parsing and secret-key lifetime.
//!
//! - `ssh` decodes the two OpenSSH textual formats this crate accepts: the
//!   one-line `ssh-ed25519` public key and the `openssh-key-v1` PEM private
//!   key container (unencrypted only).
//! - `secret` holds the [`secret::SecretKey`] type, scoped to the lifetime of
//!   a single `prove` call and zero-wiped on drop.

pub(crate) mod secret;
pub(crate) mod ssh;
