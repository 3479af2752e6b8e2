use serde::{Serialize, Deserialize};
use crate::Error;

/// Barcode symbologies that can be requested in a receipt
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BarcodeSystem {
    UPCA,
    UPCE,
    EAN13,
    EAN8,
    CODE39,
    CODE128
}

impl BarcodeSystem {
    /// Parses the canonical receipt spelling. Matching is case sensitive.
    ///
    /// ```rust
    /// use escpos_receipt::command::BarcodeSystem;
    /// assert_eq!(Some(BarcodeSystem::EAN13), BarcodeSystem::from_name("EAN13"));
    /// assert_eq!(None, BarcodeSystem::from_name("ean13"));
    /// ```
    pub fn from_name(name: &str) -> Option<BarcodeSystem> {
        match name {
            "UPCA" => Some(BarcodeSystem::UPCA),
            "UPCE" => Some(BarcodeSystem::UPCE),
            "EAN13" => Some(BarcodeSystem::EAN13),
            "EAN8" => Some(BarcodeSystem::EAN8),
            "CODE39" => Some(BarcodeSystem::CODE39),
            "CODE128" => Some(BarcodeSystem::CODE128),
            _ => None
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BarcodeSystem::UPCA => "UPCA",
            BarcodeSystem::UPCE => "UPCE",
            BarcodeSystem::EAN13 => "EAN13",
            BarcodeSystem::EAN8 => "EAN8",
            BarcodeSystem::CODE39 => "CODE39",
            BarcodeSystem::CODE128 => "CODE128"
        }
    }

    /// The `m` value for `GS k` (function B, length prefixed)
    pub fn as_byte(&self) -> u8 {
        match self {
            BarcodeSystem::UPCA => 65,
            BarcodeSystem::UPCE => 66,
            BarcodeSystem::EAN13 => 67,
            BarcodeSystem::EAN8 => 68,
            BarcodeSystem::CODE39 => 69,
            BarcodeSystem::CODE128 => 73
        }
    }

    /// Checks the code against the symbology and returns the bytes to be sent after `GS k m n`
    ///
    /// ```rust
    /// use escpos_receipt::command::BarcodeSystem;
    /// assert_eq!(b"{B12{{3".to_vec(), BarcodeSystem::CODE128.payload("12{3").unwrap());
    /// assert!(BarcodeSystem::EAN8.payload("12AB567").is_err());
    /// ```
    pub fn payload(&self, code: &str) -> Result<Vec<u8>, Error> {
        let fail = |reason: &'static str| Error::Barcode {
            system: *self,
            code: code.to_string(),
            reason
        };
        let all_digits = !code.is_empty() && code.bytes().all(|b| b.is_ascii_digit());
        match self {
            BarcodeSystem::UPCA | BarcodeSystem::UPCE | BarcodeSystem::EAN13 | BarcodeSystem::EAN8 => {
                if !all_digits {
                    return Err(fail("only digits are allowed"));
                }
                let allowed: &[usize] = match self {
                    BarcodeSystem::UPCA => &[11, 12],
                    BarcodeSystem::UPCE => &[6, 7, 8, 11, 12],
                    BarcodeSystem::EAN13 => &[12, 13],
                    _ => &[7, 8]
                };
                if !allowed.contains(&code.len()) {
                    return Err(fail("wrong number of digits"));
                }
                Ok(code.as_bytes().to_vec())
            },
            BarcodeSystem::CODE39 => {
                if code.is_empty() || code.len() > 255 {
                    return Err(fail("length must be between 1 and 255"));
                }
                if !code.bytes().all(|b| b.is_ascii_digit() || b.is_ascii_uppercase() || b" $%*+-./".contains(&b)) {
                    return Err(fail("only 0-9, A-Z, space and $%*+-./ are allowed"));
                }
                Ok(code.as_bytes().to_vec())
            },
            BarcodeSystem::CODE128 => {
                if !code.bytes().all(|b| (0x20..0x7f).contains(&b)) {
                    return Err(fail("only printable ascii is allowed"));
                }
                // Code set B, a literal brace is escaped by doubling it
                let mut payload = b"{B".to_vec();
                for b in code.bytes() {
                    if b == b'{' {
                        payload.push(b'{');
                    }
                    payload.push(b);
                }
                if code.is_empty() || payload.len() > 255 {
                    return Err(fail("length must be between 1 and 253"));
                }
                Ok(payload)
            }
        }
    }
}

impl std::fmt::Display for BarcodeSystem {
    fn fmt(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str(self.name())
    }
}
