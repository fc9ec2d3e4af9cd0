//! Result limits for catalog queries.

/// Configuration parameters for catalog queries.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Maximum number of name-search results.
    pub search_limit: usize,

    /// Minimum rating for a place to count as popular.
    pub popular_min_rating: f64,

    /// Maximum number of popular places returned.
    pub popular_limit: usize,

    /// Maximum number of places returned by a radius query.
    pub nearby_limit: usize,

    /// Maximum number of routes returned for a location.
    pub route_location_limit: usize,
}

impl CatalogConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        search_limit: usize,
        popular_min_rating: f64,
        popular_limit: usize,
        nearby_limit: usize,
        route_location_limit: usize,
    ) -> Self {
        Self {
            search_limit,
            popular_min_rating,
            popular_limit,
            nearby_limit,
            route_location_limit,
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            search_limit: 20,
            popular_min_rating: 4.5,
            popular_limit: 10,
            nearby_limit: 20,
            route_location_limit: 20,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = CatalogConfig::default();

        assert_eq!(config.search_limit, 20);
        assert!((config.popular_min_rating - 4.5).abs() < f64::EPSILON);
        assert_eq!(config.popular_limit, 10);
        assert_eq!(config.nearby_limit, 20);
        assert_eq!(config.route_location_limit, 20);
    }

    #[test]
    fn custom_config() {
        let config = CatalogConfig::new(5, 4.0, 3, 8, 2);

        assert_eq!(config.search_limit, 5);
        assert!((config.popular_min_rating - 4.0).abs() < f64::EPSILON);
        assert_eq!(config.popular_limit, 3);
        assert_eq!(config.nearby_limit, 8);
        assert_eq!(config.route_location_limit, 2);
    }
}
