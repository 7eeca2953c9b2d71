// ---------------------------------------------------------------------------
// Session gate
// ---------------------------------------------------------------------------

// Single shared credential pair. This gate keeps casual users out of the lab
// data browser; it is not a security boundary (no hashing, no lockout).
const USERNAME: &str = "TUALP";
const PASSWORD: &str = "TUALP2025";

/// Exact-match credential check.
pub fn check_credentials(username: &str, password: &str) -> bool {
    username == USERNAME && password == PASSWORD
}
