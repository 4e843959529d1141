use crate::domain::model::ConversionStep;
use crate::utils::error::{CoreError, Result};

const DIGITS: &[u8; 16] = b"0123456789ABCDEF";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Radix {
    Binary,
    Octal,
    Hex,
}

impl Radix {
    pub fn base(self) -> i64 {
        match self {
            Self::Binary => 2,
            Self::Octal => 8,
            Self::Hex => 16,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Binary => "binary",
            Self::Octal => "octal",
            Self::Hex => "hex",
        }
    }

    /// Word used for the digits of this base in question prompts.
    pub fn digit_noun(self) -> &'static str {
        match self {
            Self::Binary => "bits",
            Self::Octal => "octal digits",
            Self::Hex => "hex digits",
        }
    }

    pub fn encode(self, n: i64) -> Result<String> {
        ensure_non_negative(n)?;
        if n == 0 {
            return Ok("0".to_string());
        }

        let base = self.base();
        let mut digits = Vec::new();
        let mut num = n;
        while num > 0 {
            digits.push(DIGITS[(num % base) as usize] as char);
            num /= base;
        }
        Ok(digits.iter().rev().collect())
    }

    pub fn decode(self, input: &str) -> Result<i64> {
        let base = self.base();
        self.parse_digits(input)?
            .into_iter()
            .try_fold(0i64, |acc, (_, digit)| {
                acc.checked_mul(base).and_then(|v| v.checked_add(digit))
            })
            .ok_or_else(|| {
                CoreError::out_of_range(format!(
                    "{} value '{}' does not fit in a 64-bit integer",
                    self.name(),
                    input.trim()
                ))
            })
    }

    /// Division trace: one step per remainder, then the remainders read bottom to top.
    pub fn encode_steps(self, n: i64) -> Result<Vec<ConversionStep>> {
        ensure_non_negative(n)?;
        if n == 0 {
            return Ok(vec![ConversionStep::new(
                format!("0 in {} is", self.name()),
                "0",
            )]);
        }

        let base = self.base();
        let mut steps = Vec::new();
        let mut digits = String::new();
        let mut num = n;
        while num > 0 {
            let quotient = num / base;
            let remainder = num % base;
            let digit = DIGITS[remainder as usize] as char;
            digits.insert(0, digit);

            let label = match self {
                Self::Hex => format!(
                    "{} ÷ 16 = {}, remainder {} → '{}'",
                    num, quotient, remainder, digit
                ),
                _ => format!(
                    "{} ÷ {} = {}, remainder {}",
                    num, base, quotient, remainder
                ),
            };
            steps.push(ConversionStep::new(label, digits.clone()));
            num = quotient;
        }
        steps.push(ConversionStep::new("Read remainders bottom→top", digits));
        Ok(steps)
    }

    /// Positional trace: each digit's contribution left to right with a running total.
    pub fn decode_steps(self, input: &str) -> Result<Vec<ConversionStep>> {
        let total = self.decode(input)?;
        let digits = self.parse_digits(input)?;
        let base = self.base();
        let count = digits.len();

        let mut steps = Vec::with_capacity(count + 1);
        let mut running_total = 0i64;
        for (i, (ch, value)) in digits.into_iter().enumerate() {
            let power = (count - 1 - i) as u32;
            // A non-zero digit at this power is bounded by `total`, so this cannot overflow.
            let contribution = if value == 0 { 0 } else { value * base.pow(power) };
            running_total += contribution;

            let label = match self {
                Self::Binary => format!("Bit {}: {} × 2^{} = {}", i, value, power, contribution),
                Self::Hex => format!("'{}' ({}) × 16^{} = {}", ch, value, power, contribution),
                Self::Octal => format!("{} × 8^{} = {}", value, power, contribution),
            };
            steps.push(ConversionStep::new(
                label,
                format!("Running total: {}", running_total),
            ));
        }
        steps.push(ConversionStep::new("Sum all values", total.to_string()));
        Ok(steps)
    }

    fn parse_digits(self, input: &str) -> Result<Vec<(char, i64)>> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(CoreError::invalid_format(format!(
                "{} input is empty",
                self.name()
            )));
        }

        trimmed
            .chars()
            .map(|ch| {
                ch.to_digit(self.base() as u32)
                    .map(|value| (ch.to_ascii_uppercase(), i64::from(value)))
                    .ok_or_else(|| {
                        CoreError::invalid_format(format!(
                            "'{}' is not a valid {} digit",
                            ch,
                            self.name()
                        ))
                    })
            })
            .collect()
    }
}

fn ensure_non_negative(n: i64) -> Result<()> {
    if n < 0 {
        return Err(CoreError::out_of_range(format!(
            "negative value {} cannot be converted",
            n
        )));
    }
    Ok(())
}

fn trim_leading_zeros(digits: &str) -> String {
    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Parses user-typed decimal text.
pub fn parse_decimal(input: &str) -> Result<i64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(CoreError::invalid_format("decimal input is empty"));
    }

    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };
    if digits.is_empty() || !digits.chars().all(|ch| ch.is_ascii_digit()) {
        return Err(CoreError::invalid_format(format!(
            "'{}' is not a decimal number",
            trimmed
        )));
    }
    if negative {
        return Err(CoreError::out_of_range(format!(
            "negative value {} cannot be converted",
            trimmed
        )));
    }

    digits.parse::<i64>().map_err(|_| {
        CoreError::out_of_range(format!("'{}' does not fit in a 64-bit integer", trimmed))
    })
}

pub fn to_binary(n: i64) -> Result<String> {
    Radix::Binary.encode(n)
}

pub fn from_binary(input: &str) -> Result<i64> {
    Radix::Binary.decode(input)
}

pub fn to_hex(n: i64) -> Result<String> {
    Radix::Hex.encode(n)
}

pub fn from_hex(input: &str) -> Result<i64> {
    Radix::Hex.decode(input)
}

pub fn to_octal(n: i64) -> Result<String> {
    Radix::Octal.encode(n)
}

pub fn from_octal(input: &str) -> Result<i64> {
    Radix::Octal.decode(input)
}

/// Expands each hex digit to its 4-bit group. Works for inputs wider than 64 bits.
pub fn hex_to_binary(input: &str) -> Result<String> {
    let bits: String = Radix::Hex
        .parse_digits(input)?
        .into_iter()
        .map(|(_, value)| format!("{:04b}", value))
        .collect();
    Ok(trim_leading_zeros(&bits))
}

pub fn binary_to_hex(input: &str) -> Result<String> {
    let hex: String = binary_groups(input)?
        .into_iter()
        .map(|(_, value)| DIGITS[value] as char)
        .collect();
    Ok(trim_leading_zeros(&hex))
}

fn pad_to_nibbles(input: &str) -> Result<String> {
    let bits: String = Radix::Binary
        .parse_digits(input)?
        .into_iter()
        .map(|(ch, _)| ch)
        .collect();
    let padding = (4 - bits.len() % 4) % 4;
    Ok(format!("{}{}", "0".repeat(padding), bits))
}

fn binary_groups(input: &str) -> Result<Vec<(String, usize)>> {
    let padded = pad_to_nibbles(input)?;
    Ok(padded
        .as_bytes()
        .chunks(4)
        .map(|group| {
            let value = group
                .iter()
                .fold(0usize, |acc, bit| acc * 2 + usize::from(*bit == b'1'));
            (String::from_utf8_lossy(group).into_owned(), value)
        })
        .collect())
}

pub fn to_binary_steps(n: i64) -> Result<Vec<ConversionStep>> {
    Radix::Binary.encode_steps(n)
}

pub fn from_binary_steps(input: &str) -> Result<Vec<ConversionStep>> {
    Radix::Binary.decode_steps(input)
}

pub fn to_hex_steps(n: i64) -> Result<Vec<ConversionStep>> {
    Radix::Hex.encode_steps(n)
}

pub fn from_hex_steps(input: &str) -> Result<Vec<ConversionStep>> {
    Radix::Hex.decode_steps(input)
}

pub fn to_octal_steps(n: i64) -> Result<Vec<ConversionStep>> {
    Radix::Octal.encode_steps(n)
}

pub fn from_octal_steps(input: &str) -> Result<Vec<ConversionStep>> {
    Radix::Octal.decode_steps(input)
}

pub fn hex_to_binary_steps(input: &str) -> Result<Vec<ConversionStep>> {
    let digits = Radix::Hex.parse_digits(input)?;
    let mut steps = Vec::with_capacity(digits.len() + 1);
    let mut full_binary = String::new();
    for (ch, value) in digits {
        let group = format!("{:04b}", value);
        full_binary.push_str(&group);
        steps.push(ConversionStep::new(
            format!("Hex '{}' → 4-bit binary: {}", ch, group),
            full_binary.clone(),
        ));
    }
    steps.push(ConversionStep::new(
        "Combine all groups (trim leading 0s)",
        trim_leading_zeros(&full_binary),
    ));
    Ok(steps)
}

pub fn binary_to_hex_steps(input: &str) -> Result<Vec<ConversionStep>> {
    let padded = pad_to_nibbles(input)?;
    let groups = binary_groups(input)?;

    let mut steps = Vec::with_capacity(groups.len() + 1);
    steps.push(ConversionStep::new(
        format!("Pad to groups of 4: {}", padded),
        padded.clone(),
    ));
    let mut hex = String::new();
    for (group, value) in groups {
        let digit = DIGITS[value] as char;
        hex.push(digit);
        steps.push(ConversionStep::new(
            format!("Group '{}' = {} → '{}'", group, value, digit),
            trim_leading_zeros(&hex),
        ));
    }
    Ok(steps)
}

pub(crate) fn parse_ipv4(ip: &str) -> Result<[u8; 4]> {
    let invalid = || CoreError::invalid_format(format!("'{}' is not a dotted IPv4 address", ip));

    let parts: Vec<&str> = ip.trim().split('.').collect();
    if parts.len() != 4 {
        return Err(invalid());
    }

    let mut octets = [0u8; 4];
    for (slot, part) in octets.iter_mut().zip(parts) {
        if part.is_empty() || part.len() > 3 || !part.chars().all(|ch| ch.is_ascii_digit()) {
            return Err(invalid());
        }
        *slot = part.parse::<u8>().map_err(|_| invalid())?;
    }
    Ok(octets)
}

pub(crate) fn format_ipv4(address: u32) -> String {
    address
        .to_be_bytes()
        .iter()
        .map(|octet| octet.to_string())
        .collect::<Vec<_>>()
        .join(".")
}

/// `"192.168.1.1"` → `"11000000.10101000.00000001.00000001"`.
pub fn ip_to_binary_dotted(ip: &str) -> Result<String> {
    let octets = parse_ipv4(ip)?;
    Ok(octets
        .iter()
        .map(|octet| format!("{:08b}", octet))
        .collect::<Vec<_>>()
        .join("."))
}

pub(crate) fn prefix_mask(prefix: i64) -> Result<u32> {
    if !(0..=32).contains(&prefix) {
        return Err(CoreError::out_of_range(format!(
            "prefix length {} is outside 0..=32",
            prefix
        )));
    }
    Ok(if prefix == 0 {
        0
    } else {
        u32::MAX << (32 - prefix as u32)
    })
}

pub fn cidr_to_mask(prefix: i64) -> Result<String> {
    prefix_mask(prefix).map(format_ipv4)
}

/// The converter screen's modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConversionMode {
    DecimalToBinary,
    BinaryToDecimal,
    DecimalToHex,
    HexToDecimal,
    DecimalToOctal,
    OctalToDecimal,
    HexToBinary,
    BinaryToHex,
}

impl ConversionMode {
    pub const ALL: [ConversionMode; 8] = [
        ConversionMode::DecimalToBinary,
        ConversionMode::BinaryToDecimal,
        ConversionMode::DecimalToHex,
        ConversionMode::HexToDecimal,
        ConversionMode::DecimalToOctal,
        ConversionMode::OctalToDecimal,
        ConversionMode::HexToBinary,
        ConversionMode::BinaryToHex,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::DecimalToBinary => "Dec → Bin",
            Self::BinaryToDecimal => "Bin → Dec",
            Self::DecimalToHex => "Dec → Hex",
            Self::HexToDecimal => "Hex → Dec",
            Self::DecimalToOctal => "Dec → Oct",
            Self::OctalToDecimal => "Oct → Dec",
            Self::HexToBinary => "Hex → Bin",
            Self::BinaryToHex => "Bin → Hex",
        }
    }

    /// Sample input and its expected output, shown as a hint.
    pub fn example(&self) -> (&'static str, &'static str) {
        match self {
            Self::DecimalToBinary => ("42", "101010"),
            Self::BinaryToDecimal => ("1101", "13"),
            Self::DecimalToHex => ("255", "FF"),
            Self::HexToDecimal => ("1A", "26"),
            Self::DecimalToOctal => ("100", "144"),
            Self::OctalToDecimal => ("77", "63"),
            Self::HexToBinary => ("3F", "111111"),
            Self::BinaryToHex => ("11010110", "D6"),
        }
    }

    pub fn convert(&self, input: &str) -> Result<String> {
        match self {
            Self::DecimalToBinary => to_binary(parse_decimal(input)?),
            Self::BinaryToDecimal => from_binary(input).map(|v| v.to_string()),
            Self::DecimalToHex => to_hex(parse_decimal(input)?),
            Self::HexToDecimal => from_hex(input).map(|v| v.to_string()),
            Self::DecimalToOctal => to_octal(parse_decimal(input)?),
            Self::OctalToDecimal => from_octal(input).map(|v| v.to_string()),
            Self::HexToBinary => hex_to_binary(input),
            Self::BinaryToHex => binary_to_hex(input),
        }
    }

    pub fn steps(&self, input: &str) -> Result<Vec<ConversionStep>> {
        match self {
            Self::DecimalToBinary => to_binary_steps(parse_decimal(input)?),
            Self::BinaryToDecimal => from_binary_steps(input),
            Self::DecimalToHex => to_hex_steps(parse_decimal(input)?),
            Self::HexToDecimal => from_hex_steps(input),
            Self::DecimalToOctal => to_octal_steps(parse_decimal(input)?),
            Self::OctalToDecimal => from_octal_steps(input),
            Self::HexToBinary => hex_to_binary_steps(input),
            Self::BinaryToHex => binary_to_hex_steps(input),
        }
    }
}
