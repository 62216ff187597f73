//! Unit tests for iso-core primitives.

#[cfg(test)]
mod geo {
    use approx::assert_relative_eq;

    use crate::{BoundingBox, GeoPoint};

    #[test]
    fn zero_distance() {
        let p = GeoPoint::new(9.86557, 52.3703);
        assert!(p.distance_km(p) < 1e-9);
    }

    #[test]
    fn one_degree_of_latitude() {
        let a = GeoPoint::new(-88.0, 30.0);
        let b = GeoPoint::new(-88.0, 31.0);
        assert_relative_eq!(a.distance_km(b), 111.195, epsilon = 0.05);
    }

    #[test]
    fn destination_travels_requested_distance() {
        let origin = GeoPoint::new(9.86557, 52.3703);
        for bearing in [0.0, 45.0, 90.0, 180.0, 270.0, 333.0] {
            let dest = origin.destination(7.0, bearing);
            assert_relative_eq!(origin.distance_km(dest), 7.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn destination_bearings_point_the_right_way() {
        let origin = GeoPoint::new(10.0, 50.0);
        assert!(origin.destination(1.0, 0.0).lat > origin.lat);
        assert!(origin.destination(1.0, 90.0).lon > origin.lon);
        assert!(origin.destination(1.0, 180.0).lat < origin.lat);
        assert!(origin.destination(1.0, 270.0).lon < origin.lon);
    }

    #[test]
    fn routable_ranges() {
        assert!(GeoPoint::new(0.0, 0.0).is_routable());
        assert!(GeoPoint::new(539.0, -90.0).is_routable());
        assert!(!GeoPoint::new(0.0, 90.5).is_routable());
        assert!(!GeoPoint::new(-541.0, 0.0).is_routable());
        assert!(!GeoPoint::new(f64::NAN, 0.0).is_routable());
    }

    #[test]
    fn bbox_from_points() {
        let b = BoundingBox::from_points([
            GeoPoint::new(1.0, 5.0),
            GeoPoint::new(-2.0, 3.0),
            GeoPoint::new(4.0, -1.0),
        ])
        .unwrap();
        assert_eq!(b, BoundingBox::new(-2.0, -1.0, 4.0, 5.0));
        assert_eq!(b.center(), GeoPoint::new(1.0, 2.0));
        assert!(b.contains(GeoPoint::new(4.0, 5.0)));
        assert!(!b.contains(GeoPoint::new(4.1, 5.0)));
        assert!(BoundingBox::from_points(std::iter::empty()).is_none());
    }
}

#[cfg(test)]
mod profile {
    use crate::RoutingProfile;

    #[test]
    fn parse_aliases() {
        assert_eq!("car".parse::<RoutingProfile>().unwrap(), RoutingProfile::Car);
        assert_eq!("AUTO".parse::<RoutingProfile>().unwrap(), RoutingProfile::Car);
        assert_eq!("motorcycle".parse::<RoutingProfile>().unwrap(), RoutingProfile::Motorbike);
        assert_eq!("foot".parse::<RoutingProfile>().unwrap(), RoutingProfile::Pedestrian);
        assert!("hovercraft".parse::<RoutingProfile>().is_err());
    }

    #[test]
    fn display_roundtrips_through_parse() {
        for p in RoutingProfile::ALL {
            assert_eq!(p.to_string().parse::<RoutingProfile>().unwrap(), p);
        }
    }

    #[test]
    fn serde_lowercase() {
        let p: RoutingProfile = serde_json::from_str("\"bicycle\"").unwrap();
        assert_eq!(p, RoutingProfile::Bicycle);
        assert_eq!(serde_json::to_string(&RoutingProfile::Pedestrian).unwrap(), "\"pedestrian\"");
    }
}

#[cfg(test)]
mod config {
    use crate::{CoreError, IsoConfig, ProviderConfig, ProviderKind, RoutingProfile};

    #[test]
    fn defaults() {
        let c = IsoConfig::default();
        assert_eq!(c.resolution, 0.2);
        assert_eq!(c.hex_size, 0.5);
        assert_eq!(c.profile, RoutingProfile::Car);
        assert_eq!(c.provider, ProviderKind::Osrm);
        assert!(!c.deintersect);
        assert_eq!(c.chunk_size, 1000);
        assert_eq!(c.max_attempts, 10);
        assert_eq!(c.growth_factor, 2.0);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn empty_json_is_default() {
        let c: IsoConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(c, IsoConfig::default());
    }

    #[test]
    fn camel_case_keys() {
        let c: IsoConfig =
            serde_json::from_str(r#"{"hexSize": 0, "chunkSize": 8, "provider": "valhalla"}"#)
                .unwrap();
        assert_eq!(c.hex_size, 0.0);
        assert!(!c.hex_fitting());
        assert_eq!(c.chunk_size, 8);
        assert_eq!(c.provider, ProviderKind::Valhalla);
    }

    #[test]
    fn rejects_bad_values() {
        let bad = [
            IsoConfig { resolution: 0.0, ..IsoConfig::default() },
            IsoConfig { resolution: f64::NAN, ..IsoConfig::default() },
            IsoConfig { hex_size: -0.1, ..IsoConfig::default() },
            IsoConfig { chunk_size: 0, ..IsoConfig::default() },
            IsoConfig { max_attempts: 0, ..IsoConfig::default() },
            IsoConfig { growth_factor: 1.0, ..IsoConfig::default() },
        ];
        for c in bad {
            assert!(matches!(c.validate(), Err(CoreError::Validation(_))), "{c:?}");
        }
    }

    #[test]
    fn provider_parse() {
        assert_eq!("OSRM".parse::<ProviderKind>().unwrap(), ProviderKind::Osrm);
        assert_eq!("embedded".parse::<ProviderKind>().unwrap(), ProviderKind::Embedded);
        let err = "graphhopper".parse::<ProviderKind>().unwrap_err();
        assert_eq!(err.to_string(), "invalid input: invalid provider (graphhopper)");
    }

    #[test]
    fn endpoint_override() {
        let mut p = ProviderConfig::default();
        p.set_endpoint(ProviderKind::Valhalla, "http://valhalla:8002/route");
        assert_eq!(p.valhalla_endpoint, "http://valhalla:8002/route");
        assert_eq!(p.osrm_endpoint, "http://127.0.0.1:5000/route/v1/");
    }
}

#[cfg(test)]
mod ring {
    use geo_types::MultiPolygon;
    use serde_json::json;

    use crate::{DistanceMetadata, Properties, Ring, RingSet};

    fn empty(d: f64) -> Ring {
        Ring::new(d, MultiPolygon(vec![]))
    }

    #[test]
    fn new_ring_carries_distance() {
        let r = empty(2.0);
        assert_eq!(r.properties["distance"], json!(2));
        let r = empty(2.5);
        assert_eq!(r.properties["distance"], json!(2.5));
    }

    #[test]
    fn merge_keeps_traced_distance() {
        let mut r = empty(5.0);
        let mut extra = Properties::new();
        extra.insert("label".into(), json!("mid"));
        extra.insert("distance".into(), json!(99));
        r.merge_properties(&extra);
        assert_eq!(r.properties["label"], json!("mid"));
        assert_eq!(r.properties["distance"], json!(5));
    }

    #[test]
    fn ring_set_sorts_descending() {
        let set = RingSet::from_rings(vec![empty(2.0), empty(7.0), empty(5.0)]);
        assert_eq!(set.distances(), vec![7.0, 5.0, 2.0]);
        assert!(set.is_strictly_descending());
        assert!(set.get(5.0).is_some());
        assert!(set.get(6.0).is_none());
    }

    #[test]
    fn metadata_insert_replaces() {
        let mut m = DistanceMetadata::from_distances(&[2.0, 5.0]);
        assert_eq!(m.len(), 2);
        let mut p = Properties::new();
        p.insert("color".into(), json!("red"));
        m.insert(2.0, p);
        assert_eq!(m.len(), 2);
        assert_eq!(m.get(2.0).unwrap()["color"], json!("red"));
        assert_eq!(m.get(5.0).unwrap()["distance"], json!(5));
        assert!(m.get(3.0).is_none());
    }
}

#[cfg(test)]
mod request {
    use serde_json::json;

    use crate::{GeoPoint, IsoConfig, ProviderKind, RequestBody, RoutingProfile};

    const BODY: &str = r#"{
        "origin": { "type": "Point", "coordinates": [9.86557, 52.3703] },
        "distances": [ { "distance": 2, "label": "short" }, { "distance": 5 } ],
        "hexSize": 0.25,
        "profile": "foot",
        "deintersect": true
    }"#;

    #[test]
    fn parses_full_body() {
        let body: RequestBody = serde_json::from_str(BODY).unwrap();
        assert_eq!(body.origin(), Some(GeoPoint::new(9.86557, 52.3703)));
        assert_eq!(body.distances(), vec![2.0, 5.0]);
        assert_eq!(body.hex_size, Some(0.25));
        assert_eq!(body.profile, Some(RoutingProfile::Pedestrian));
        assert!(body.resolution.is_none());
    }

    #[test]
    fn metadata_keeps_extra_keys() {
        let body: RequestBody = serde_json::from_str(BODY).unwrap();
        let meta = body.metadata();
        assert_eq!(meta.get(2.0).unwrap()["label"], json!("short"));
        assert_eq!(meta.get(2.0).unwrap()["distance"], json!(2));
        assert_eq!(meta.get(5.0).unwrap().len(), 1);
    }

    #[test]
    fn apply_overrides_only_present_fields() {
        let body: RequestBody = serde_json::from_str(BODY).unwrap();
        let mut c = IsoConfig { resolution: 0.1, ..IsoConfig::default() };
        body.apply_to(&mut c);
        assert_eq!(c.resolution, 0.1);
        assert_eq!(c.hex_size, 0.25);
        assert_eq!(c.profile, RoutingProfile::Pedestrian);
        assert_eq!(c.provider, ProviderKind::Osrm);
        assert!(c.deintersect);
    }

    #[test]
    fn empty_body_parses() {
        let body: RequestBody = serde_json::from_str("{}").unwrap();
        assert!(body.origin().is_none());
        assert!(body.distances.is_empty());
    }

    #[test]
    fn origin_type_defaults_to_point() {
        let body: RequestBody =
            serde_json::from_str(r#"{"origin": {"coordinates": [1.0, 2.0]}}"#).unwrap();
        assert_eq!(body.origin.unwrap().kind, "Point");
    }
}
