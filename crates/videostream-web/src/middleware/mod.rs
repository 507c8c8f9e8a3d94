pub mod session_gate;

pub use session_gate::{
    apply_cookie_mutations, session_cookies_from_headers, session_gate, CurrentSession,
};
