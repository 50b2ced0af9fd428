//! PEM framing for SPKI and PKCS#8 DER bodies (RFC 7468)
//!
//! Only the two labels used for algorithm-agnostic key material are
//! recognized: `PUBLIC KEY` (SPKI) and `PRIVATE KEY` (PKCS#8). A block must
//! stand alone: whitespace around it is tolerated, any other text is not.

use jwtkit_common::{ensure, Error, ErrorKind, OptionExt, Result};
use pem::{EncodeConfig, LineEnding, Pem};

/// Base64 characters per PEM body line
pub const LINE_WIDTH: usize = 64;

const BEGIN: &str = "-----BEGIN ";

/// Which half of a key pair a PEM block carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PemKind {
    /// `PUBLIC KEY`, SPKI body
    Public,
    /// `PRIVATE KEY`, PKCS#8 body
    Private,
}

impl PemKind {
    /// The label between the dashes
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Public => "PUBLIC KEY",
            Self::Private => "PRIVATE KEY",
        }
    }

    fn from_label(label: &str) -> Option<Self> {
        match label {
            "PUBLIC KEY" => Some(Self::Public),
            "PRIVATE KEY" => Some(Self::Private),
            _ => None,
        }
    }
}

/// Frame DER bytes as PEM text: LF line endings, 64-character body lines,
/// newline after the END marker
#[must_use]
pub fn wrap(der: &[u8], kind: PemKind) -> String {
    let block = Pem::new(kind.label(), der);
    pem::encode_config(&block, EncodeConfig::new().set_line_ending(LineEnding::LF))
}

/// Strip the markers and whitespace and decode the body
///
/// # Errors
/// `MalformedPem` when no recognizable marker pair surrounds the body or the
/// body is not standard base64.
pub fn unwrap(pem: &str) -> Result<Vec<u8>> {
    parse(pem).map(|(_, der)| der)
}

/// Like [`unwrap`], additionally requiring the block to carry `expected`
///
/// # Errors
/// `MalformedPem` on any framing problem or a label mismatch.
pub fn unwrap_as(pem: &str, expected: PemKind) -> Result<Vec<u8>> {
    let (kind, der) = parse(pem)?;
    ensure!(
        kind == expected,
        malformed_pem,
        "expected a {} block, found {}",
        expected.label(),
        kind.label()
    );
    Ok(der)
}

/// Decode a PEM block into its kind and DER body
///
/// # Errors
/// `MalformedPem` on any framing problem, a second block, or text before
/// the BEGIN line or after the END line.
pub fn parse(pem: &str) -> Result<(PemKind, Vec<u8>)> {
    let text = pem.trim();
    ensure!(text.starts_with(BEGIN), malformed_pem, "no BEGIN marker");

    let mut blocks = pem::parse_many(text)
        .map_err(|e| Error::with_source(ErrorKind::MalformedPem, e))?
        .into_iter();
    let block = blocks
        .next()
        .ok_or_kind(ErrorKind::MalformedPem, "no complete BEGIN/END pair")?;
    ensure!(blocks.next().is_none(), malformed_pem, "more than one PEM block");

    let label = block.tag();
    let kind = PemKind::from_label(label)
        .ok_or_kind(ErrorKind::MalformedPem, format!("unsupported label {label:?}"))?;
    ensure!(
        text.ends_with(&format!("-----END {label}-----")),
        malformed_pem,
        "unexpected text after END {label} marker"
    );
    Ok((kind, block.into_contents()))
}
