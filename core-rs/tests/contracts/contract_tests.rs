//! Contract Tests - Core Invariant Protection
//!
//! This file aggregates all contract test modules.
//! Contract tests verify invariants that MUST NEVER BREAK.

// Contract test modules
mod contracts {
    // Identity cache contracts
    mod identity {
        include!("identity_contracts.rs");
    }

    // Base class resolution contracts
    mod resolution {
        include!("resolution_contracts.rs");
    }
}
