/**
 * Dimensionless internal unit system (component A).
 *
 * Three reference scales (average box side, average density, average
 * pressure) determine every other internal unit. Constructed once at
 * `StepDriver::initialise` time and immutable thereafter.
 */
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct UnitSystem {
    length_scale: f64,
    density_scale: f64,
    pressure_scale: f64,
}




/// The physical quantities the unit system knows how to convert.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Quantity {
    Length,
    SurfaceArea,
    Volume,
    Mass,
    Velocity,
    Acceleration,
    Density,
    Pressure,
    Momentum,
    Energy,
    Time,
}




// ============================================================================
impl UnitSystem {
    /// Build the unit system from average box size, average density and
    /// average pressure, all given in SI.
    pub fn from_averages(length_scale: f64, density_scale: f64, pressure_scale: f64) -> Self {
        Self { length_scale, density_scale, pressure_scale }
    }

    fn time_scale(&self) -> f64 {
        self.length_scale * (self.density_scale / self.pressure_scale).sqrt()
    }

    fn velocity_scale(&self) -> f64 {
        self.length_scale / self.time_scale()
    }

    fn mass_scale(&self) -> f64 {
        self.density_scale * self.length_scale.powi(3)
    }

    fn acceleration_scale(&self) -> f64 {
        self.velocity_scale() / self.time_scale()
    }

    fn energy_scale(&self) -> f64 {
        self.mass_scale() * self.velocity_scale().powi(2)
    }

    /// SI value of one internal unit of `q`.
    pub fn unit_internal(&self, q: Quantity) -> f64 {
        match q {
            Quantity::Length       => self.length_scale,
            Quantity::SurfaceArea  => self.length_scale.powi(2),
            Quantity::Volume       => self.length_scale.powi(3),
            Quantity::Mass         => self.mass_scale(),
            Quantity::Velocity     => self.velocity_scale(),
            Quantity::Acceleration => self.acceleration_scale(),
            Quantity::Density      => self.density_scale,
            Quantity::Pressure     => self.pressure_scale,
            Quantity::Momentum     => self.mass_scale() * self.velocity_scale(),
            Quantity::Energy       => self.energy_scale(),
            Quantity::Time         => self.time_scale(),
        }
    }

    /// Internal value of one SI unit of `q`.
    pub fn unit_si(&self, q: Quantity) -> f64 {
        1.0 / self.unit_internal(q)
    }

    pub fn to_internal(&self, q: Quantity, x_si: f64) -> f64 {
        x_si / self.unit_internal(q)
    }

    pub fn to_si(&self, q: Quantity, x_internal: f64) -> f64 {
        x_internal * self.unit_internal(q)
    }
}
