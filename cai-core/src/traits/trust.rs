use crate::models::Payload;

/// Supplies the provenance trust of a context.
pub trait ITrustProvider: Send + Sync {
    /// Trust in [0, 1] for the given context.
    fn trust(&self, context: &Payload) -> f64;

    /// Scale a base weight by the context's trust.
    fn adjusted_weight(&self, base_weight: f64, context: &Payload) -> f64 {
        base_weight * self.trust(context)
    }
}
