//! Two-tier derived-value cache discipline.
//!
//! Pricing entities keep their derived outputs in two tiers:
//!
//! - **primary**: cheap values needed to produce a price and its first
//!   derivative (schedules, discount factors, d1/d2). This is the only tier
//!   recomputed inside root-finder inner loops.
//! - **secondary**: everything else (duration, convexity, the full set of
//!   Greeks). Recomputed once, after the primary tier is final.
//!
//! Every mutation of a primary input is followed by a full [`refresh`], so
//! reads are never stale and reading twice without a mutation returns
//! bit-identical values.
//!
//! [`refresh`]: TieredCache::refresh

/// Recompute hooks for an entity's derived values.
pub trait TieredCache {
    /// Recomputes the primary tier from the primary inputs.
    fn refresh_primary(&mut self);

    /// Recomputes the secondary tier from the primary tier.
    ///
    /// Must only read values produced by [`refresh_primary`](Self::refresh_primary).
    fn refresh_secondary(&mut self);

    /// Recomputes both tiers in order.
    fn refresh(&mut self) {
        self.refresh_primary();
        self.refresh_secondary();
    }
}
