//! # Repository Module
//!
//! Database repository implementations for the phone catalog.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  gRPC handler / console menu                                           │
//! │       │                                                                 │
//! │       │  db.products().find_by_id(1)                                   │
//! │       ▼                                                                 │
//! │  ProductRepository                                                     │
//! │  ├── find_all / list                                                   │
//! │  ├── find_by_id / get                                                  │
//! │  ├── insert / create                                                   │
//! │  ├── update / save                                                     │
//! │  └── delete / remove                                                   │
//! │       │                                                                 │
//! │       │  one connection per call                                       │
//! │       ▼                                                                 │
//! │  producto table (MySQL or SQLite)                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod product;
