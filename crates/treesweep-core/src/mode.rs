use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// Unix permission bits: the three rwx triads plus setuid/setgid/sticky.
///
/// Renders as the classic nine-character string (`rw-r--r--`) with the
/// special bits folded into the execute positions (`s`/`S`, `t`/`T`).
/// String and bits convert both ways without loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileMode(u32);

const MODE_MASK: u32 = 0o7777;
const SETUID: u32 = 0o4000;
const SETGID: u32 = 0o2000;
const STICKY: u32 = 0o1000;

impl FileMode {
    pub fn from_bits(bits: u32) -> Self {
        FileMode(bits & MODE_MASK)
    }

    pub fn bits(&self) -> u32 {
        self.0
    }
}

fn triad(out: &mut String, bits: u32, shift: u32, special: u32, special_char: char) {
    let perms = bits >> shift;
    out.push(if perms & 0o4 != 0 { 'r' } else { '-' });
    out.push(if perms & 0o2 != 0 { 'w' } else { '-' });
    let x = perms & 0o1 != 0;
    out.push(match (bits & special != 0, x) {
        (true, true) => special_char,
        (true, false) => special_char.to_ascii_uppercase(),
        (false, true) => 'x',
        (false, false) => '-',
    });
}

impl fmt::Display for FileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = String::with_capacity(9);
        triad(&mut s, self.0, 6, SETUID, 's');
        triad(&mut s, self.0, 3, SETGID, 's');
        triad(&mut s, self.0, 0, STICKY, 't');
        f.write_str(&s)
    }
}

fn parse_triad(chars: &[char], shift: u32, special: u32, special_char: char) -> Option<u32> {
    let mut bits = 0u32;
    match chars[0] {
        'r' => bits |= 0o4,
        '-' => {}
        _ => return None,
    }
    match chars[1] {
        'w' => bits |= 0o2,
        '-' => {}
        _ => return None,
    }
    let mut special_set = false;
    match chars[2] {
        'x' => bits |= 0o1,
        '-' => {}
        c if c == special_char => {
            bits |= 0o1;
            special_set = true;
        }
        c if c == special_char.to_ascii_uppercase() => special_set = true,
        _ => return None,
    }
    let mut out = bits << shift;
    if special_set {
        out |= special;
    }
    Some(out)
}

impl FromStr for FileMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 9 {
            return Err(Error::InvalidMode(s.to_string()));
        }
        let owner = parse_triad(&chars[0..3], 6, SETUID, 's');
        let group = parse_triad(&chars[3..6], 3, SETGID, 's');
        let other = parse_triad(&chars[6..9], 0, STICKY, 't');
        match (owner, group, other) {
            (Some(o), Some(g), Some(t)) => Ok(FileMode(o | g | t)),
            _ => Err(Error::InvalidMode(s.to_string())),
        }
    }
}
