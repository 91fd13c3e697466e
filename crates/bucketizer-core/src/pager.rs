//! Round-robin pager
//!
//! Shared by the basic bucketizer and the fallback path of key-based
//! strategies. The overflow check runs before the member is counted, so a
//! page holds exactly `page_size` members and the member that triggers the
//! check is the first one of the next page.

/// Result of placing one member
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageStep {
    /// Page the member was placed on
    pub page: u64,
    /// Page that was closed by this member, if any
    pub rolled_over_from: Option<u64>,
}

/// Page number and fill level of the active page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoundRobinPager {
    page_number: u64,
    member_counter: u64,
}

impl RoundRobinPager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore from exported counters
    pub fn restore(page_number: u64, member_counter: u64) -> Self {
        Self { page_number, member_counter }
    }

    pub fn page_number(&self) -> u64 {
        self.page_number
    }

    pub fn member_counter(&self) -> u64 {
        self.member_counter
    }

    /// Place one member, opening the next page when the active one is full
    pub fn advance(&mut self, page_size: usize) -> PageStep {
        let mut rolled_over_from = None;

        if self.member_counter >= page_size as u64 {
            rolled_over_from = Some(self.page_number);
            self.page_number += 1;
            self.member_counter = 0;
        }

        self.member_counter += 1;

        PageStep {
            page: self.page_number,
            rolled_over_from,
        }
    }
}
