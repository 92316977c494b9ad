/// How strongly the client insists on TLS for the connection.
///
/// Ordered so that `as u8` comparisons express "at least as strict as".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SslMode {
    Disabled,
    Preferred,
    Require,
    VerifyCa,
    VerifyIdentity,
}
