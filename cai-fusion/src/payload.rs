//! Key-by-key payload fusion.
//!
//! For each key in the union of member payloads:
//! - all values numeric: confidence-weighted mean (plain mean at zero total confidence)
//! - all values objects: fused recursively while under the depth limit
//! - otherwise: the value with the highest summed confidence, first seen on ties
//!
//! A key whose values are all equal keeps that value unchanged.

use serde_json::{Number, Value};

use cai_core::models::Payload;

/// Fuse payloads weighted by member confidence.
pub fn fuse_payloads(members: &[(&Payload, f64)], max_depth: usize) -> Payload {
    fuse_level(members, 0, max_depth)
}

fn fuse_level(members: &[(&Payload, f64)], depth: usize, max_depth: usize) -> Payload {
    let mut keys: Vec<&String> = members.iter().flat_map(|(p, _)| p.keys()).collect();
    keys.sort();
    keys.dedup();

    keys.into_iter()
        .map(|key| {
            let values: Vec<(&Value, f64)> = members
                .iter()
                .filter_map(|(p, c)| p.get(key).map(|v| (v, *c)))
                .collect();
            (key.clone(), fuse_values(&values, depth, max_depth))
        })
        .collect()
}

fn fuse_values(values: &[(&Value, f64)], depth: usize, max_depth: usize) -> Value {
    let first = values[0].0;
    if values.iter().all(|(v, _)| *v == first) {
        return first.clone();
    }

    if values.iter().all(|(v, _)| v.is_number()) {
        let numbers: Vec<(f64, f64)> = values
            .iter()
            .filter_map(|(v, c)| v.as_f64().map(|x| (x, *c)))
            .collect();
        if let Some(mean) = weighted_mean(&numbers) {
            if let Some(n) = Number::from_f64(mean) {
                return Value::Number(n);
            }
        }
    }

    if depth < max_depth && values.iter().all(|(v, _)| v.is_object()) {
        let objects: Vec<(&Payload, f64)> = values
            .iter()
            .filter_map(|(v, c)| v.as_object().map(|o| (o, *c)))
            .collect();
        return Value::Object(fuse_level(&objects, depth + 1, max_depth));
    }

    vote(values)
}

fn weighted_mean(numbers: &[(f64, f64)]) -> Option<f64> {
    if numbers.is_empty() {
        return None;
    }
    let total: f64 = numbers.iter().map(|(_, c)| c).sum();
    let mean = if total > 0.0 {
        numbers.iter().map(|(x, c)| x * c).sum::<f64>() / total
    } else {
        numbers.iter().map(|(x, _)| x).sum::<f64>() / numbers.len() as f64
    };
    // Keep the result inside the observed range despite rounding.
    let lo = numbers.iter().map(|(x, _)| *x).fold(f64::INFINITY, f64::min);
    let hi = numbers.iter().map(|(x, _)| *x).fold(f64::NEG_INFINITY, f64::max);
    Some(mean.clamp(lo, hi))
}

/// Value with the highest summed confidence; the first seen wins ties.
fn vote(values: &[(&Value, f64)]) -> Value {
    let mut tallies: Vec<(&Value, f64)> = Vec::new();
    for (value, confidence) in values {
        match tallies.iter_mut().find(|(v, _)| v == value) {
            Some((_, total)) => *total += confidence,
            None => tallies.push((*value, *confidence)),
        }
    }
    let mut best = tallies[0];
    for candidate in &tallies[1..] {
        if candidate.1 > best.1 {
            best = *candidate;
        }
    }
    best.0.clone()
}
