//! Eviction policies.
//!
//! | Policy   | Victim                                     | Eviction cost |
//! |----------|--------------------------------------------|---------------|
//! | `lru`    | least recently used                        | O(1)          |
//! | `lfu`    | lowest frequency, least recently touched   | O(1)          |
//! | `hybrid` | lowest `alpha * freq + beta * recency`     | O(n) scan     |

pub mod hybrid;
pub mod lfu;
pub mod lru;
