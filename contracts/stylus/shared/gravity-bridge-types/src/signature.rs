use alloy_primitives::{keccak256, B256};

const ETH_SIGNED_MESSAGE_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n32";

/// A validator's signature over a transition digest, positionally bound to one member of the
/// signer roster.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValidatorSignature {
    pub v: u8,
    pub r: B256,
    pub s: B256,
}

impl ValidatorSignature {
    /// The sentinel a relayer submits for a validator that did not sign.
    pub const ABSTAIN: Self = Self {
        v: 0,
        r: B256::ZERO,
        s: B256::ZERO,
    };

    pub fn new(v: u8, r: B256, s: B256) -> Self {
        Self { v, r, s }
    }

    pub fn is_abstention(&self) -> bool {
        self.v == 0
    }

    /// `v` in the Ethereum form accepted by `ecrecover`.
    pub fn has_recoverable_v(&self) -> bool {
        matches!(self.v, 27 | 28)
    }

    /// `r || s || v`.
    pub fn to_bytes(&self) -> [u8; 65] {
        let mut out = [0u8; 65];
        out[..32].copy_from_slice(self.r.as_slice());
        out[32..64].copy_from_slice(self.s.as_slice());
        out[64] = self.v;
        out
    }
}

impl From<(u8, B256, B256)> for ValidatorSignature {
    fn from((v, r, s): (u8, B256, B256)) -> Self {
        Self { v, r, s }
    }
}

/// `keccak256("\x19Ethereum Signed Message:\n32" || digest)`, the hash validators actually sign.
pub fn eth_signed_message_hash(digest: B256) -> B256 {
    let mut buf = [0u8; 28 + 32];
    buf[..28].copy_from_slice(ETH_SIGNED_MESSAGE_PREFIX);
    buf[28..].copy_from_slice(digest.as_slice());
    keccak256(buf)
}
