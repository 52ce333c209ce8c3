use std::fmt;

/// Build identity reported by the native core types library.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub revision: u32,
}

impl Version {
    #[must_use]
    pub const fn new(major: u32, minor: u32, revision: u32) -> Self {
        Self {
            major,
            minor,
            revision,
        }
    }
}

impl From<(u32, u32, u32)> for Version {
    fn from((major, minor, revision): (u32, u32, u32)) -> Self {
        Self::new(major, minor, revision)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buffer = itoa::Buffer::new();
        f.write_str(buffer.format(self.major))?;
        f.write_str(".")?;
        f.write_str(buffer.format(self.minor))?;
        f.write_str(".")?;
        f.write_str(buffer.format(self.revision))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_dotted_triple() {
        assert_eq!(Version::new(3, 10, 2).to_string(), "3.10.2");
        assert_eq!(Version::new(0, 0, 0).to_string(), "0.0.0");
        assert_eq!(
            Version::new(u32::MAX, 1, 0).to_string(),
            "4294967295.1.0"
        );
    }

    #[test]
    fn orders_by_major_then_minor_then_revision() {
        assert!(Version::new(1, 2, 3) < Version::new(1, 3, 0));
        assert!(Version::new(2, 0, 0) > Version::new(1, 99, 99));
        assert!(Version::new(1, 2, 3) < Version::new(1, 2, 4));
        assert_eq!(Version::from((4, 5, 6)), Version::new(4, 5, 6));
    }
}
