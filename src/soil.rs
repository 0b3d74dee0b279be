//! Soil layers and the fixed sand–clay–sand layer stack.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::ParameterError;

/// Unit weight of pore water in kN/m³.
///
/// The model rounds the usual 9.81 kN/m³ to 10 kN/m³.
pub const UNIT_WEIGHT_OF_WATER: f64 = 10.0;

/// Position of a layer within the [`LayerStack`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerKind {
    /// Free-draining sand at the surface.
    UpperSand,
    /// Clay, the only layer with transient excess pore pressure.
    Clay,
    /// Free-draining sand below the clay.
    LowerSand,
}

impl LayerKind {
    /// All layers in top-down order.
    pub const ALL: [LayerKind; 3] = [LayerKind::UpperSand, LayerKind::Clay, LayerKind::LowerSand];

    /// Return `true` for the free-draining sand layers.
    #[must_use]
    pub const fn is_sand(self) -> bool {
        !matches!(self, LayerKind::Clay)
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LayerKind::UpperSand => "upper sand",
            LayerKind::Clay => "clay",
            LayerKind::LowerSand => "lower sand",
        };
        f.write_str(name)
    }
}

/// Thickness and unit weights of a single soil layer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SoilLayer {
    /// Layer thickness in metres. Zero removes the layer from the profile.
    pub thickness: f64,
    /// Unit weight above the water table in kN/m³.
    pub dry_unit_weight: f64,
    /// Unit weight below the water table in kN/m³.
    pub saturated_unit_weight: f64,
}

impl SoilLayer {
    /// Create a [`SoilLayer`] with explicit properties.
    #[must_use]
    pub const fn new(thickness: f64, dry_unit_weight: f64, saturated_unit_weight: f64) -> Self {
        Self {
            thickness,
            dry_unit_weight,
            saturated_unit_weight,
        }
    }

    /// Submerged (buoyant) unit weight `γ' = γ_sat − γ_w` in kN/m³.
    ///
    /// # Examples
    /// ```
    /// use terzaghi::SoilLayer;
    ///
    /// let sand = SoilLayer::new(2.0, 18.0, 19.0);
    /// assert_eq!(sand.submerged_unit_weight(), 9.0);
    /// ```
    #[must_use]
    pub fn submerged_unit_weight(&self) -> f64 {
        self.saturated_unit_weight - UNIT_WEIGHT_OF_WATER
    }

    /// Check thickness and unit weights on behalf of `layer`.
    fn validate(&self, layer: LayerKind) -> Result<(), ParameterError> {
        let thickness = ParameterError::require_finite("thickness", self.thickness)?;
        if thickness < 0.0 {
            return Err(ParameterError::NegativeThickness { layer, thickness });
        }
        for unit_weight in [self.dry_unit_weight, self.saturated_unit_weight] {
            let unit_weight = ParameterError::require_finite("unit weight", unit_weight)?;
            if unit_weight <= 0.0 {
                return Err(ParameterError::NonPositiveUnitWeight { layer, unit_weight });
            }
        }
        Ok(())
    }
}

/// Clay layer with its coefficient of consolidation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClayLayer {
    /// Layer thickness in metres.
    pub thickness: f64,
    /// Unit weight above the water table in kN/m³.
    pub dry_unit_weight: f64,
    /// Unit weight below the water table in kN/m³.
    pub saturated_unit_weight: f64,
    /// Coefficient of consolidation `c_v` in m²/day.
    pub consolidation_coefficient: f64,
}

impl ClayLayer {
    /// Create a [`ClayLayer`] with explicit properties.
    #[must_use]
    pub const fn new(
        thickness: f64,
        dry_unit_weight: f64,
        saturated_unit_weight: f64,
        consolidation_coefficient: f64,
    ) -> Self {
        Self {
            thickness,
            dry_unit_weight,
            saturated_unit_weight,
            consolidation_coefficient,
        }
    }

    /// View the clay as a plain [`SoilLayer`].
    #[must_use]
    pub const fn as_soil(&self) -> SoilLayer {
        SoilLayer::new(
            self.thickness,
            self.dry_unit_weight,
            self.saturated_unit_weight,
        )
    }
}

/// Depth interval occupied by a layer, measured downward from the surface.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayerBounds {
    /// Depth of the top boundary in metres.
    pub top: f64,
    /// Depth of the bottom boundary in metres.
    pub bottom: f64,
}

impl LayerBounds {
    /// Thickness of the interval in metres.
    #[must_use]
    pub fn thickness(&self) -> f64 {
        self.bottom - self.top
    }
}

/// The three soil layers in their fixed top-down order.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerStack {
    /// Sand at the surface; hosts the water table.
    pub upper_sand: SoilLayer,
    /// Compressible clay.
    pub clay: ClayLayer,
    /// Sand below the clay.
    pub lower_sand: SoilLayer,
}

impl Default for LayerStack {
    fn default() -> Self {
        Self {
            upper_sand: SoilLayer::new(2.0, 18.0, 19.0),
            clay: ClayLayer::new(4.0, 19.0, 21.0, 0.05),
            lower_sand: SoilLayer::new(2.0, 18.0, 19.0),
        }
    }
}

impl LayerStack {
    /// Create a stack from its three layers.
    #[must_use]
    pub const fn new(upper_sand: SoilLayer, clay: ClayLayer, lower_sand: SoilLayer) -> Self {
        Self {
            upper_sand,
            clay,
            lower_sand,
        }
    }

    /// Return the soil properties of `kind`.
    #[must_use]
    pub fn layer(&self, kind: LayerKind) -> SoilLayer {
        match kind {
            LayerKind::UpperSand => self.upper_sand,
            LayerKind::Clay => self.clay.as_soil(),
            LayerKind::LowerSand => self.lower_sand,
        }
    }

    /// Sum of the layer thicknesses in metres.
    ///
    /// # Examples
    /// ```
    /// use terzaghi::LayerStack;
    ///
    /// assert_eq!(LayerStack::default().total_depth(), 8.0);
    /// ```
    #[must_use]
    pub fn total_depth(&self) -> f64 {
        self.upper_sand.thickness + self.clay.thickness + self.lower_sand.thickness
    }

    /// Depth interval of `kind`, from the cumulative thickness of the layers above it.
    #[must_use]
    pub fn bounds(&self, kind: LayerKind) -> LayerBounds {
        let top = match kind {
            LayerKind::UpperSand => 0.0,
            LayerKind::Clay => self.upper_sand.thickness,
            LayerKind::LowerSand => self.upper_sand.thickness + self.clay.thickness,
        };
        LayerBounds {
            top,
            bottom: top + self.layer(kind).thickness,
        }
    }

    /// Layers with their bounds, top-down.
    pub fn iter(&self) -> impl Iterator<Item = (LayerKind, SoilLayer, LayerBounds)> + '_ {
        LayerKind::ALL
            .into_iter()
            .map(move |kind| (kind, self.layer(kind), self.bounds(kind)))
    }

    /// Submerged unit weight of each layer, top-down, rounded to two decimals for display.
    #[must_use]
    pub fn submerged_unit_weights(&self) -> [f64; 3] {
        LayerKind::ALL.map(|kind| round_to_hundredths(self.layer(kind).submerged_unit_weight()))
    }

    /// Check every layer property.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParameterError`] found, scanning the layers top-down and the
    /// clay coefficient of consolidation last.
    pub fn validate(&self) -> Result<(), ParameterError> {
        for kind in LayerKind::ALL {
            self.layer(kind).validate(kind)?;
        }
        let value = ParameterError::require_finite(
            "coefficient of consolidation",
            self.clay.consolidation_coefficient,
        )?;
        if value <= 0.0 {
            return Err(ParameterError::NonPositiveConsolidationCoefficient { value });
        }
        Ok(())
    }
}

/// Round to two decimal places.
fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
