/// Floors of one tower: `(floor, units_on_that_floor)` in listing order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TowerScheme {
    pub tower: String,
    pub floors: Vec<(i64, u32)>,
}

/// Fixed numbering scheme of the building. The unit catalog is a pure
/// function of this table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildingScheme {
    pub towers: Vec<TowerScheme>,
}

impl BuildingScheme {
    /// The three-tower building: 128 units.
    pub fn standard() -> Self {
        let tower = |name: &str, floors: &[(i64, u32)]| TowerScheme {
            tower: name.to_string(),
            floors: floors.to_vec(),
        };
        Self {
            towers: vec![
                tower("A", &[(1, 15), (2, 18), (3, 15)]),
                tower("B", &[(1, 14), (2, 14), (3, 13)]),
                tower("C", &[(1, 13), (2, 13), (3, 13)]),
            ],
        }
    }

    /// Tower identifiers in scheme order.
    pub fn towers(&self) -> Vec<&str> {
        self.towers.iter().map(|t| t.tower.as_str()).collect()
    }

    /// Floors of a tower, or `None` if the tower is not part of the scheme.
    pub fn floors(&self, tower: &str) -> Option<Vec<i64>> {
        self.towers
            .iter()
            .find(|t| t.tower == tower)
            .map(|t| t.floors.iter().map(|(floor, _)| *floor).collect())
    }

    pub fn total_units(&self) -> usize {
        self.towers
            .iter()
            .flat_map(|t| t.floors.iter())
            .map(|(_, count)| *count as usize)
            .sum()
    }
}
