//! Unit tests for iso-route.
//!
//! Routing tests use a hand-crafted network so they run without any OSM file
//! or routing service; the HTTP routers are exercised through their request
//! builders and response parsers.

#[cfg(test)]
mod helpers {
    use iso_core::GeoPoint;

    use crate::{AccessMask, NodeId, RoadNetwork, RoadNetworkBuilder};

    pub const LAT: f64 = 52.37;

    /// Small network with lengths chosen so the shortest path differs by
    /// mode.
    ///
    /// Nodes (lon offsets along one parallel, roughly 68 m apart):
    ///
    /// ```text
    ///   0 ──car+foot── 1 ──car+foot── 2
    ///   │                              │
    ///   └──────── foot-only ───────────┘   (short cut, 100 m)
    ///   3 (isolated)
    /// ```
    ///
    /// Edge 0-1 and 1-2 are 500 m each, 0-2 footpath is 100 m, 2→1 is
    /// one-way for cars.
    pub fn sample_network() -> (RoadNetwork, [NodeId; 4]) {
        let mut b = RoadNetworkBuilder::new();
        let n0 = b.add_node(GeoPoint::new(9.000, LAT));
        let n1 = b.add_node(GeoPoint::new(9.001, LAT));
        let n2 = b.add_node(GeoPoint::new(9.002, LAT));
        let n3 = b.add_node(GeoPoint::new(9.050, LAT));

        b.add_road(n0, n1, 500.0, AccessMask::ALL);
        // One-way for cars 1 → 2; bikes and pedestrians both ways.
        b.add_directed_edge(n1, n2, 500.0, AccessMask::ALL);
        b.add_directed_edge(n2, n1, 500.0, AccessMask::ALL.without(AccessMask::CAR));
        b.add_road(n0, n2, 100.0, AccessMask::FOOT);

        (b.build(), [n0, n1, n2, n3])
    }

    pub fn pos(i: usize) -> GeoPoint {
        [
            GeoPoint::new(9.000, LAT),
            GeoPoint::new(9.001, LAT),
            GeoPoint::new(9.002, LAT),
            GeoPoint::new(9.050, LAT),
        ][i]
    }
}

// ── Builder & network structure ────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use iso_core::GeoPoint;

    use super::helpers::{sample_network, LAT};
    use crate::{AccessMask, RoadNetworkBuilder};

    #[test]
    fn empty_build() {
        let net = RoadNetworkBuilder::new().build();
        assert_eq!(net.node_count(), 0);
        assert_eq!(net.edge_count(), 0);
        assert!(net.is_empty());
        assert!(net.snap_to_node(GeoPoint::new(0.0, 0.0)).is_none());
    }

    #[test]
    fn csr_layout() {
        let (net, [n0, n1, n2, n3]) = sample_network();
        assert_eq!(net.node_count(), 4);
        assert_eq!(net.edge_count(), 6);
        assert_eq!(net.out_degree(n0), 2);
        assert_eq!(net.out_degree(n1), 2);
        assert_eq!(net.out_degree(n2), 2);
        assert_eq!(net.out_degree(n3), 0);
        for e in net.out_edges(n0) {
            assert!([n1, n2].contains(&net.edge_to[e.index()]));
        }
    }

    #[test]
    fn edges_without_access_are_dropped() {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_node(GeoPoint::new(9.0, LAT));
        let c = b.add_node(GeoPoint::new(9.1, LAT));
        b.add_directed_edge(a, c, 10.0, AccessMask::NONE);
        assert_eq!(b.edge_count(), 0);
    }

    #[test]
    fn snap_picks_nearest() {
        let (net, [_, n1, _, n3]) = sample_network();
        assert_eq!(net.snap_to_node(GeoPoint::new(9.0011, LAT + 0.0001)), Some(n1));
        assert_eq!(net.snap_to_node(GeoPoint::new(9.2, LAT)), Some(n3));
    }
}

// ── Access masks ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod access {
    use iso_core::RoutingProfile;

    use crate::AccessMask;

    #[test]
    fn profile_bits() {
        assert_eq!(AccessMask::for_profile(RoutingProfile::Car), AccessMask::CAR);
        assert_eq!(AccessMask::for_profile(RoutingProfile::Motorbike), AccessMask::CAR);
        assert_eq!(AccessMask::for_profile(RoutingProfile::Bicycle), AccessMask::BIKE);
        assert_eq!(AccessMask::for_profile(RoutingProfile::Pedestrian), AccessMask::FOOT);
    }

    #[test]
    fn allows_and_without() {
        let m = AccessMask::ALL.without(AccessMask::CAR);
        assert!(!m.allows(AccessMask::CAR));
        assert!(m.allows(AccessMask::FOOT));
        assert!(m.allows(AccessMask::BIKE | AccessMask::FOOT));
        assert!(!m.allows(AccessMask::NONE));
    }
}

// ── Embedded router ───────────────────────────────────────────────────────────

#[cfg(test)]
mod embedded {
    use approx::assert_relative_eq;
    use iso_core::{GeoPoint, RoutingProfile};

    use super::helpers::{pos, sample_network};
    use crate::{AccessMask, EmbeddedRouter, RoadNetworkBuilder, RouteError, Router, TREE_CACHE_CAPACITY};

    fn router() -> EmbeddedRouter {
        EmbeddedRouter::new(sample_network().0)
    }

    #[test]
    fn car_follows_roads() {
        let r = router();
        let d = r.distance_km(pos(0), pos(2), RoutingProfile::Car).unwrap();
        assert_relative_eq!(d, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn pedestrian_takes_footpath() {
        let r = router();
        let d = r.distance_km(pos(0), pos(2), RoutingProfile::Pedestrian).unwrap();
        assert_relative_eq!(d, 0.1, epsilon = 1e-9);
    }

    #[test]
    fn one_way_blocks_cars_only() {
        let r = router();
        // 2 → 1 is closed to cars, and 2 has no other car edge.
        assert!(matches!(
            r.distance_km(pos(2), pos(0), RoutingProfile::Car),
            Err(RouteError::NoRoute { .. })
        ));
        let bike = r.distance_km(pos(2), pos(0), RoutingProfile::Bicycle).unwrap();
        assert_relative_eq!(bike, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn origin_is_zero() {
        let r = router();
        assert_eq!(r.distance_km(pos(1), pos(1), RoutingProfile::Car).unwrap(), 0.0);
    }

    #[test]
    fn disconnected_node_is_no_route() {
        let r = router();
        let err = r.distance_km(pos(0), pos(3), RoutingProfile::Car).unwrap_err();
        assert!(matches!(err, RouteError::NoRoute { .. }));
        assert!(err.is_per_query());
    }

    #[test]
    fn snap_limit_rejects_far_points() {
        let r = router().with_max_snap_km(0.5);
        let far = GeoPoint::new(9.001, 52.5);
        assert!(matches!(
            r.distance_km(pos(0), far, RoutingProfile::Car),
            Err(RouteError::NoRoute { .. })
        ));
        assert!(r.distance_km(pos(0), pos(1), RoutingProfile::Car).is_ok());
    }

    #[test]
    fn invalid_coordinate() {
        let r = router();
        let err = r
            .distance_km(pos(0), GeoPoint::new(9.0, 95.0), RoutingProfile::Car)
            .unwrap_err();
        assert!(matches!(err, RouteError::InvalidCoordinate(_)));
    }

    #[test]
    fn cached_tree_is_keyed_by_profile() {
        let r = router();
        let car = r.distance_km(pos(0), pos(2), RoutingProfile::Car).unwrap();
        let foot = r.distance_km(pos(0), pos(2), RoutingProfile::Pedestrian).unwrap();
        let car_again = r.distance_km(pos(0), pos(2), RoutingProfile::Car).unwrap();
        assert!(foot < car);
        assert_eq!(car, car_again);
        assert_eq!(r.trees_built(), 2);
    }

    #[test]
    fn alternating_origins_reuse_their_trees() {
        let r = router();
        let a = r.distance_km(pos(0), pos(2), RoutingProfile::Car).unwrap();
        let b = r.distance_km(pos(1), pos(2), RoutingProfile::Car).unwrap();
        for _ in 0..3 {
            assert_eq!(r.distance_km(pos(0), pos(2), RoutingProfile::Car).unwrap(), a);
            assert_eq!(r.distance_km(pos(1), pos(2), RoutingProfile::Car).unwrap(), b);
        }
        assert_eq!(r.trees_built(), 2);
    }

    #[test]
    fn every_origin_and_profile_gets_its_own_tree() {
        let r = router();
        let profiles = [RoutingProfile::Car, RoutingProfile::Bicycle, RoutingProfile::Pedestrian];
        let keys: Vec<_> = (0..4).flat_map(|i| profiles.map(|p| (i, p))).collect();
        for _ in 0..2 {
            for &(i, p) in &keys {
                let _ = r.distance_km(pos(i), pos(1), p);
            }
        }
        assert_eq!(r.trees_built(), keys.len());
    }

    #[test]
    fn least_recently_used_tree_is_evicted() {
        let mut b = RoadNetworkBuilder::new();
        let nodes: Vec<_> = (0..TREE_CACHE_CAPACITY + 4)
            .map(|i| b.add_node(GeoPoint::new(9.0 + i as f64 * 0.01, 52.0)))
            .collect();
        for w in nodes.windows(2) {
            b.add_road(w[0], w[1], 680.0, AccessMask::ALL);
        }
        let r = EmbeddedRouter::new(b.build());
        let at = |i: usize| r.network().node_pos[nodes[i].index()];

        for i in 0..nodes.len() {
            r.distance_km(at(i), at(0), RoutingProfile::Car).unwrap();
        }
        assert_eq!(r.trees_built(), nodes.len());

        // The newest tree survived, the oldest was dropped.
        r.distance_km(at(nodes.len() - 1), at(0), RoutingProfile::Car).unwrap();
        assert_eq!(r.trees_built(), nodes.len());
        r.distance_km(at(0), at(1), RoutingProfile::Car).unwrap();
        assert_eq!(r.trees_built(), nodes.len() + 1);
    }

    #[tokio::test]
    async fn async_route_matches_sync() {
        let r = router();
        let a = r.route(pos(0), pos(1), RoutingProfile::Car).await.unwrap();
        assert_relative_eq!(a, 0.5, epsilon = 1e-9);
    }
}

// ── Response parsing ──────────────────────────────────────────────────────────

#[cfg(test)]
mod response {
    use approx::assert_relative_eq;
    use iso_core::GeoPoint;
    use reqwest::StatusCode;

    use crate::response::{ensure_json, parse_route_distance, valhalla_failure};
    use crate::RouteError;

    const A: GeoPoint = GeoPoint { lon: 9.86557, lat: 52.3703 };
    const B: GeoPoint = GeoPoint { lon: 9.9, lat: 52.4 };

    #[test]
    fn ok_route_in_km() {
        let body = r#"{"code":"Ok","routes":[{"distance":2345.6,"duration":300.0}],"waypoints":[]}"#;
        assert_relative_eq!(parse_route_distance(body, A, B).unwrap(), 2.3456, epsilon = 1e-12);
    }

    #[test]
    fn first_route_wins() {
        let body = r#"{"code":"Ok","routes":[{"distance":1000},{"distance":10}]}"#;
        assert_relative_eq!(parse_route_distance(body, A, B).unwrap(), 1.0);
    }

    #[test]
    fn no_route_codes() {
        for body in [
            r#"{"code":"NoRoute","message":"Impossible route"}"#,
            r#"{"code":"Ok","routes":[]}"#,
            r#"{"code":"NoSegment"}"#,
        ] {
            assert!(matches!(parse_route_distance(body, A, B), Err(RouteError::NoRoute { .. })), "{body}");
        }
    }

    #[test]
    fn other_codes_are_network_errors() {
        let body = r#"{"code":"InvalidQuery","message":"Query string malformed"}"#;
        let err = parse_route_distance(body, A, B).unwrap_err();
        assert!(matches!(err, RouteError::Network(ref m) if m.contains("InvalidQuery")));
    }

    #[test]
    fn malformed_body() {
        assert!(matches!(parse_route_distance("<html>", A, B), Err(RouteError::Network(_))));
    }

    #[test]
    fn status_and_content_type_checks() {
        assert!(ensure_json(StatusCode::OK, Some("application/json; charset=utf-8")).is_ok());
        assert!(ensure_json(StatusCode::BAD_GATEWAY, Some("application/json")).is_err());
        assert!(ensure_json(StatusCode::OK, Some("text/html")).is_err());
        assert!(ensure_json(StatusCode::OK, None).is_err());
    }

    #[test]
    fn valhalla_no_path_is_no_route() {
        let body = r#"{"error_code":442,"error":"No path could be found for input","status_code":400,"status":"Bad Request"}"#;
        assert!(matches!(
            valhalla_failure(StatusCode::BAD_REQUEST, body, A, B),
            RouteError::NoRoute { .. }
        ));
    }

    #[test]
    fn valhalla_other_errors_are_network() {
        let body = r#"{"error_code":154,"error":"Path distance exceeds the max distance limit"}"#;
        assert!(matches!(
            valhalla_failure(StatusCode::BAD_REQUEST, body, A, B),
            RouteError::Network(ref m) if m.contains("154")
        ));
        assert!(matches!(
            valhalla_failure(StatusCode::INTERNAL_SERVER_ERROR, "oops", A, B),
            RouteError::Network(_)
        ));
    }
}

// ── HTTP routers ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod http {
    use std::time::Duration;

    use iso_core::{GeoPoint, ProviderConfig, ProviderKind, RoutingProfile};
    use serde_json::json;

    use crate::valhalla::ValhallaRequest;
    use crate::{AnyRouter, OsrmRouter, RouteError, ValhallaRouter};

    const A: GeoPoint = GeoPoint { lon: 9.86557, lat: 52.3703 };
    const B: GeoPoint = GeoPoint { lon: 9.9, lat: 52.4 };

    #[test]
    fn osrm_url_layout() {
        let r = OsrmRouter::new("http://127.0.0.1:5000/route/v1", Duration::from_secs(5)).unwrap();
        assert_eq!(r.endpoint(), "http://127.0.0.1:5000/route/v1/");
        assert_eq!(
            r.route_url(A, B, RoutingProfile::Pedestrian).unwrap(),
            "http://127.0.0.1:5000/route/v1/foot/9.86557,52.3703;9.9,52.4"
        );
    }

    #[test]
    fn osrm_rejects_motorbike() {
        let r = OsrmRouter::new("http://localhost/", Duration::from_secs(5)).unwrap();
        assert!(matches!(
            r.route_url(A, B, RoutingProfile::Motorbike),
            Err(RouteError::InvalidProfile { provider: ProviderKind::Osrm, .. })
        ));
    }

    #[test]
    fn osrm_rejects_out_of_range_coordinates() {
        let r = OsrmRouter::new("http://localhost/", Duration::from_secs(5)).unwrap();
        let bad = GeoPoint::new(600.0, 10.0);
        assert!(matches!(r.route_url(A, bad, RoutingProfile::Car), Err(RouteError::InvalidCoordinate(_))));
    }

    #[test]
    fn valhalla_request_body() {
        let req = ValhallaRequest::new(A, B, RoutingProfile::Car);
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "locations": [
                    { "lat": 52.3703, "lon": 9.86557, "type": "break" },
                    { "lat": 52.4, "lon": 9.9, "type": "break" }
                ],
                "costing": "auto",
                "directions_options": { "units": "kilometers", "format": "osrm" }
            })
        );
    }

    #[test]
    fn valhalla_costing_per_profile() {
        assert_eq!(ValhallaRouter::costing(RoutingProfile::Motorbike), "motorcycle");
        assert_eq!(ValhallaRouter::costing(RoutingProfile::Bicycle), "bicycle");
        assert_eq!(ValhallaRouter::costing(RoutingProfile::Pedestrian), "pedestrian");
    }

    #[test]
    fn empty_endpoints_are_config_errors() {
        assert!(matches!(OsrmRouter::new("", Duration::from_secs(1)), Err(RouteError::Config(_))));
        assert!(matches!(ValhallaRouter::new("", Duration::from_secs(1)), Err(RouteError::Config(_))));
    }

    #[test]
    fn provider_selection() {
        let cfg = ProviderConfig::default();
        let osrm = AnyRouter::from_config(ProviderKind::Osrm, &cfg, None).unwrap();
        assert_eq!(osrm.kind(), ProviderKind::Osrm);
        let valhalla = AnyRouter::from_config(ProviderKind::Valhalla, &cfg, None).unwrap();
        assert_eq!(valhalla.kind(), ProviderKind::Valhalla);
        assert!(matches!(
            AnyRouter::from_config(ProviderKind::Embedded, &cfg, None),
            Err(RouteError::Config(_))
        ));
    }
}
