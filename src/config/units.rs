//! Unit helpers. Everything in the simulation core works in base units:
//! watt-hours for energy, watts for installed capacity, kilograms for
//! hydrogen mass. These helpers keep scenario definitions readable.

// ----------
// Energy (to Wh)
// ----------

#[inline]
pub fn pwh(value: f64) -> f64 {
    value * 1_000_000_000_000_000.0
}

#[inline]
pub fn twh(value: f64) -> f64 {
    value * 1_000_000_000_000.0
}

#[inline]
pub fn gwh(value: f64) -> f64 {
    value * 1_000_000_000.0
}

#[inline]
pub fn mwh(value: f64) -> f64 {
    value * 1_000_000.0
}

#[inline]
pub fn kwh(value: f64) -> f64 {
    value * 1_000.0
}

// ----------
// Power (to W)
// ----------

#[inline]
pub fn tw(value: f64) -> f64 {
    value * 1_000_000_000_000.0
}

#[inline]
pub fn gw(value: f64) -> f64 {
    value * 1_000_000_000.0
}

#[inline]
pub fn mw(value: f64) -> f64 {
    value * 1_000_000.0
}

#[inline]
pub fn kw(value: f64) -> f64 {
    value * 1_000.0
}

// ----------
// Mass (to kg)
// ----------

#[inline]
pub fn tonnes(value: f64) -> f64 {
    value * 1_000.0
}

#[inline]
pub fn kilotonnes(value: f64) -> f64 {
    value * 1_000_000.0
}

// ----------
// Display helpers (from Wh / kg)
// ----------

#[inline]
pub fn as_twh(wh: f64) -> f64 {
    wh / 1_000_000_000_000.0
}

#[inline]
pub fn as_gwh(wh: f64) -> f64 {
    wh / 1_000_000_000.0
}

#[inline]
pub fn as_gw(w: f64) -> f64 {
    w / 1_000_000_000.0
}

#[inline]
pub fn as_kilotonnes(kg: f64) -> f64 {
    kg / 1_000_000.0
}
