//! # Repository Module
//!
//! Database repository implementations for Ladder.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  Request handler                                                        │
//! │       │                                                                 │
//! │       │  db.tiers().list_active("demo.myshopify.com")                   │
//! │       ▼                                                                 │
//! │  TierRepository                                                         │
//! │  ├── list_active(&self, shop)     ← the resolver's input contract       │
//! │  ├── get_by_id(&self, shop, id)                                         │
//! │  ├── insert(&self, tier)                                                │
//! │  └── update / set_active / delete ← admin screens                       │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                        │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • SQL is isolated in one place                                         │
//! │  • Shop scoping is enforced at one seam, not per call site              │
//! │  • Easy to test against an in-memory database                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`tier::TierRepository`] - Discount tier CRUD and the ordered
//!   active-tier read the resolver consumes

pub mod tier;
