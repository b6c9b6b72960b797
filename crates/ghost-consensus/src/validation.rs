use crate::domain::{BlockRecord, ConsensusConfig, RejectReason};
use shared_types::{BlockHeader, Hash};

/// Stateless checks applied to a header before its proof of work.
///
/// Each check is consensus-critical; the first failure rejects the header.
pub struct HeaderValidator;

impl HeaderValidator {
    /// Run the structural checks in order: parent, timestamp, uncle count, difficulty.
    pub fn validate(
        header: &BlockHeader,
        parent: &BlockRecord,
        config: &ConsensusConfig,
    ) -> Result<(), RejectReason> {
        Self::validate_parent(header)?;
        Self::validate_timestamp(header, parent, config.min_block_spacing_ms)?;
        Self::validate_uncle_count(header, config.max_uncles)?;
        Self::validate_difficulty(header, parent)?;
        Ok(())
    }

    /// The previous-hash list must name a primary parent
    pub fn validate_parent(header: &BlockHeader) -> Result<&Hash, RejectReason> {
        header.parent_hash().ok_or(RejectReason::NoParent)
    }

    /// Timestamp must be at least `min_spacing` ms after the parent's
    pub fn validate_timestamp(
        header: &BlockHeader,
        parent: &BlockRecord,
        min_spacing: u64,
    ) -> Result<(), RejectReason> {
        let parent_timestamp = parent.header.timestamp();
        if header.timestamp < parent_timestamp.saturating_add(min_spacing) {
            return Err(RejectReason::TimestampTooEarly {
                timestamp: header.timestamp,
                parent: parent_timestamp,
                min_spacing,
            });
        }
        Ok(())
    }

    /// At most `max_uncles` entries after the primary parent
    pub fn validate_uncle_count(
        header: &BlockHeader,
        max_uncles: usize,
    ) -> Result<(), RejectReason> {
        let count = header.uncle_hashes().len();
        if count > max_uncles {
            return Err(RejectReason::TooManyUncles {
                count,
                max: max_uncles,
            });
        }
        Ok(())
    }

    /// Declared difficulty must equal the parent's retargeted value exactly
    pub fn validate_difficulty(
        header: &BlockHeader,
        parent: &BlockRecord,
    ) -> Result<(), RejectReason> {
        if header.difficulty != parent.next_difficulty {
            return Err(RejectReason::DifficultyMismatch {
                declared: header.difficulty,
                expected: parent.next_difficulty,
            });
        }
        Ok(())
    }
}
