// wf-core/src/units.rs

use uom::si::f64::{
    Acceleration as UomAcceleration, Frequency as UomFrequency, Length as UomLength,
    Time as UomTime,
};

// Public canonical unit types (SI, f64)
pub type Accel = UomAcceleration;
pub type Frequency = UomFrequency;
pub type Length = UomLength;
pub type Time = UomTime;

#[inline]
pub fn hz(v: f64) -> Frequency {
    use uom::si::frequency::hertz;
    Frequency::new::<hertz>(v)
}

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn mps2(v: f64) -> Accel {
    use uom::si::acceleration::meter_per_second_squared;
    Accel::new::<meter_per_second_squared>(v)
}

#[inline]
pub fn s(v: f64) -> Time {
    use uom::si::time::second;
    Time::new::<second>(v)
}

pub mod constants {
    /// Gravitational acceleration used by the laboratory cost models.
    pub const G_LAB_MPS2: f64 = 9.8;
}
