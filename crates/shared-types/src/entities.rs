//! # Chain Entities
//!
//! - **Headers**: `BlockHeader`, `GenesisHeader`, `ChainHeader`
//! - **Blocks**: `Block`, `Transaction`
//! - **Identity**: `Hash`, `Address`

use serde::{Deserialize, Serialize};
use shared_crypto::Blake2bHasher;

pub use shared_crypto::Hash;

/// A 20-byte account address. Identifies the miner of a header.
pub type Address = [u8; 20];

/// Header of a mined block.
///
/// `previous_hash[0]` is the primary parent; every later entry is a declared
/// uncle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockHeader {
    /// Primary parent followed by declared uncles.
    pub previous_hash: Vec<Hash>,
    /// Merkle root of the block's transactions.
    pub merkle_root: Hash,
    /// State root after applying the block.
    pub state_root: Hash,
    /// Probability that one hash attempt meets the target, in (0, 1].
    pub difficulty: f64,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
    /// Proof-of-work nonce.
    pub nonce: u64,
    /// Reward recipient.
    pub miner: Address,
}

impl BlockHeader {
    /// Identity hash of the complete header.
    pub fn hash(&self) -> Hash {
        let mut hasher = self.hasher_without_nonce();
        hasher.update(&self.nonce.to_le_bytes());
        hasher.finalize()
    }

    /// Identity hash of every field except the nonce.
    ///
    /// This is the proof-of-work pre-image: miners vary only the nonce.
    pub fn pre_hash(&self) -> Hash {
        self.hasher_without_nonce().finalize()
    }

    /// The primary parent, if the header declares one.
    pub fn parent_hash(&self) -> Option<&Hash> {
        self.previous_hash.first()
    }

    /// Declared uncles (every previous hash after the primary parent).
    pub fn uncle_hashes(&self) -> &[Hash] {
        self.previous_hash.get(1..).unwrap_or_default()
    }

    fn hasher_without_nonce(&self) -> Blake2bHasher {
        let mut hasher = Blake2bHasher::new();
        hasher.update(&(self.previous_hash.len() as u32).to_le_bytes());
        for previous in &self.previous_hash {
            hasher.update(previous);
        }
        hasher
            .update(&self.merkle_root)
            .update(&self.state_root)
            .update(&self.difficulty.to_bits().to_le_bytes())
            .update(&self.timestamp.to_le_bytes())
            .update(&self.miner);
        hasher
    }
}

/// Header of the genesis block. It has no parent, no proof of work and no
/// miner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisHeader {
    /// Merkle root of the genesis allocations.
    pub merkle_root: Hash,
    /// Initial state root.
    pub state_root: Hash,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
}

impl GenesisHeader {
    /// Identity hash of the genesis header.
    pub fn hash(&self) -> Hash {
        let mut hasher = Blake2bHasher::new();
        hasher
            .update(&self.merkle_root)
            .update(&self.state_root)
            .update(&self.timestamp.to_le_bytes());
        hasher.finalize()
    }
}

/// Either kind of header a persisted block can carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChainHeader {
    /// The chain root.
    Genesis(GenesisHeader),
    /// A mined header.
    Block(BlockHeader),
}

impl ChainHeader {
    /// Identity hash of the wrapped header.
    pub fn hash(&self) -> Hash {
        match self {
            ChainHeader::Genesis(header) => header.hash(),
            ChainHeader::Block(header) => header.hash(),
        }
    }

    /// Header timestamp in milliseconds.
    pub fn timestamp(&self) -> u64 {
        match self {
            ChainHeader::Genesis(header) => header.timestamp,
            ChainHeader::Block(header) => header.timestamp,
        }
    }

    /// The mined header, or `None` for genesis.
    pub fn as_block_header(&self) -> Option<&BlockHeader> {
        match self {
            ChainHeader::Genesis(_) => None,
            ChainHeader::Block(header) => Some(header),
        }
    }
}

impl From<BlockHeader> for ChainHeader {
    fn from(header: BlockHeader) -> Self {
        ChainHeader::Block(header)
    }
}

impl From<GenesisHeader> for ChainHeader {
    fn from(header: GenesisHeader) -> Self {
        ChainHeader::Genesis(header)
    }
}

/// A transaction as the consensus core sees it: opaque, already encoded.
///
/// Execution belongs to the state-transition engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction(pub Vec<u8>);

/// A full block: header plus body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// The block header.
    pub header: BlockHeader,
    /// Encoded transactions in block order.
    pub transactions: Vec<Transaction>,
}

impl Block {
    /// Get the hash of this block
    pub fn hash(&self) -> Hash {
        self.header.hash()
    }
}
