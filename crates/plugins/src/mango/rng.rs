//! Randomness used by drops and tree generation

use std::collections::VecDeque;

/// Source of random draws.
///
/// Growth and drops take the source as a parameter so tests can replay an
/// exact sequence of draws.
pub trait RngSource: Send {
    /// Uniform in `[0, 1)`
    fn next_double(&mut self) -> f64;

    /// Uniform in `[0, bound)`. A bound of zero yields zero.
    fn next_int(&mut self, bound: u32) -> u32;

    fn next_bool(&mut self) -> bool;
}

impl RngSource for fastrand::Rng {
    fn next_double(&mut self) -> f64 {
        self.f64()
    }

    fn next_int(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        self.u32(..bound)
    }

    fn next_bool(&mut self) -> bool {
        self.bool()
    }
}

impl RngSource for rand::rngs::StdRng {
    fn next_double(&mut self) -> f64 {
        rand::Rng::gen::<f64>(self)
    }

    fn next_int(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        rand::Rng::gen_range(self, 0..bound)
    }

    fn next_bool(&mut self) -> bool {
        rand::Rng::gen::<bool>(self)
    }
}

/// A single recorded draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Draw {
    Double(f64),
    Int(u32),
    Bool(bool),
}

/// Replays a fixed sequence of draws.
///
/// When the script runs out, or the next draw has a different kind than the
/// one requested, the fallback value for that kind is returned instead
/// (`0.0`, `0`, `false`) and the mismatched draw is left in place.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRng {
    draws: VecDeque<Draw>,
    consumed: usize,
}

impl ScriptedRng {
    pub fn new(draws: impl IntoIterator<Item = Draw>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
            consumed: 0,
        }
    }

    pub fn push(&mut self, draw: Draw) {
        self.draws.push_back(draw);
    }

    /// Draws left in the script
    pub fn remaining(&self) -> usize {
        self.draws.len()
    }

    /// Draws served from the script so far
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    fn take<T>(&mut self, pick: impl Fn(Draw) -> Option<T>) -> Option<T> {
        let value = self.draws.front().copied().and_then(pick)?;
        self.draws.pop_front();
        self.consumed += 1;
        Some(value)
    }
}

impl RngSource for ScriptedRng {
    fn next_double(&mut self) -> f64 {
        self.take(|d| match d {
            Draw::Double(v) => Some(v),
            _ => None,
        })
        .unwrap_or(0.0)
    }

    fn next_int(&mut self, bound: u32) -> u32 {
        self.take(|d| match d {
            Draw::Int(v) => Some(v),
            _ => None,
        })
        .map(|v| if bound == 0 { 0 } else { v.min(bound - 1) })
        .unwrap_or(0)
    }

    fn next_bool(&mut self) -> bool {
        self.take(|d| match d {
            Draw::Bool(v) => Some(v),
            _ => None,
        })
        .unwrap_or(false)
    }
}

/// Roll a probability in `[0, 1]`: `0.0` never succeeds, `1.0` always does
pub fn roll(rng: &mut dyn RngSource, chance: f64) -> bool {
    rng.next_double() < chance
}
