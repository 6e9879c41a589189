pub trait FloatExt: Sized {
    /// Returns `Some(f)` if `f` is far enough from zero (further than `eps`)
    ///
    /// Returns None for NaN and Some(f) for +/- infty
    fn into_non_zero(self, eps: Self) -> Option<Self>;

    /// Returns `Some(f)` if f is finite, None for NaN and +/- infty
    fn into_finite(self) -> Option<Self>;

    /// Replace NaN and infinities by `fallback`
    fn finite_or(self, fallback: Self) -> Self {
        self.into_finite().unwrap_or(fallback)
    }
}

impl FloatExt for f32 {
    fn into_non_zero(self, eps: Self) -> Option<f32> {
        (self.abs() > eps).then_some(self)
    }

    fn into_finite(self) -> Option<f32> {
        self.is_finite().then_some(self)
    }
}

impl FloatExt for f64 {
    fn into_non_zero(self, eps: Self) -> Option<f64> {
        (self.abs() > eps).then_some(self)
    }

    fn into_finite(self) -> Option<f64> {
        self.is_finite().then_some(self)
    }
}
