/// Identifies a domain.  Ids are only meaningful within the process, and
/// are never reused.
#[derive(Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Clone, Copy, Default)]
pub struct DomainId(pub u32);

/// Identifies a number, whichever domain it belongs to
#[derive(Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Clone, Copy, Default)]
pub struct NumberId(pub u64);

/// Whatever owns a domain (a trait, a document,...).  The library never
/// interprets it.
#[derive(Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Clone, Copy, Default)]
pub struct OwnerId(pub u32);

impl std::fmt::Display for DomainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "d{}", self.0)
    }
}

impl std::fmt::Display for NumberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "n{}", self.0)
    }
}

impl std::fmt::Display for OwnerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "o{}", self.0)
    }
}

/// Hands out monotonically increasing ids, one sequence per kind of
/// element.  There is no global instance: whoever creates domains and
/// numbers passes its own.
#[derive(Debug, Default)]
pub struct Ids {
    last_domain: u32,
    last_number: u64,
    last_owner: u32,
}

impl Ids {
    pub fn next_domain(&mut self) -> DomainId {
        self.last_domain += 1;
        DomainId(self.last_domain)
    }

    pub fn next_number(&mut self) -> NumberId {
        self.last_number += 1;
        NumberId(self.last_number)
    }

    pub fn next_owner(&mut self) -> OwnerId {
        self.last_owner += 1;
        OwnerId(self.last_owner)
    }
}
