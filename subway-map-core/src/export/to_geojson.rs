use geojson::{Feature, FeatureCollection, Geometry, Value as GeoJsonValue};
use serde_json::json;

use super::Selection;
use crate::{
    Error,
    loading::MapConfig,
    model::{NetworkSnapshot, ServiceGeometry, Station, TopologyStore},
};

/// One `LineString` feature per service polyline, services in id order.
///
/// Properties carry the offset index and its zoom stops so the renderer can
/// apply `line-offset` directly.
pub fn lines_to_geojson(
    snapshot: &NetworkSnapshot,
    config: &MapConfig,
    selection: &Selection,
) -> Result<FeatureCollection, Error> {
    let mut features = Vec::new();

    for service in snapshot.derived().services() {
        let offset = snapshot.offset_of(&service.id).unwrap_or_default();
        let offset_stops: Vec<[f64; 2]> = config
            .offset_table
            .get(offset)
            .map(|lateral| lateral.stops.iter().map(|stop| [stop.0, stop.1]).collect())
            .unwrap_or_default();
        let opacity = line_opacity(service, config, selection);

        for (index, polyline) in service.polylines.iter().enumerate() {
            let geometry = Geometry::new(GeoJsonValue::from(polyline));
            let value = json!({
                "type": "Feature",
                "geometry": geometry,
                "properties": {
                    "service_id": service.id,
                    "name": service.display_name,
                    "color": service.color,
                    "polyline_index": index,
                    "offset": offset,
                    "offset_stops": offset_stops,
                    "opacity": opacity,
                }
            });
            features.push(
                Feature::from_json_value(value).map_err(|e| Error::GeoJsonError(e.to_string()))?,
            );
        }
    }

    Ok(FeatureCollection {
        features,
        bbox: None,
        foreign_members: None,
    })
}

/// One `Point` feature per station in the topology
pub fn stops_to_geojson(
    topology: &TopologyStore,
    snapshot: &NetworkSnapshot,
    config: &MapConfig,
    selection: &Selection,
) -> Result<FeatureCollection, Error> {
    let features = topology
        .stations()
        .map(|station| stop_feature(station, snapshot, config, selection))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(FeatureCollection {
        features,
        bbox: None,
        foreign_members: None,
    })
}

fn stop_feature(
    station: &Station,
    snapshot: &NetworkSnapshot,
    config: &MapConfig,
    selection: &Selection,
) -> Result<Feature, Error> {
    let icon = snapshot.classify(&station.id, selection.service());
    let opacity = match selection.service() {
        Some(service) => {
            let stops_here = snapshot
                .derived()
                .service(service)
                .is_some_and(|geometry| geometry.stops.contains(&station.id));
            if stops_here {
                config.opacity.stop_selected
            } else {
                config.opacity.stop_dimmed
            }
        }
        None => config.opacity.stop_selected,
    };

    let value = json!({
        "type": "Feature",
        "geometry": Geometry::new(GeoJsonValue::from(&station.geometry)),
        "properties": {
            "id": station.id,
            "name": station.display_name(),
            "secondary_name": station.secondary_name,
            "icon": icon,
            "opacity": opacity,
        }
    });

    Feature::from_json_value(value).map_err(|e| Error::GeoJsonError(e.to_string()))
}

fn line_opacity(service: &ServiceGeometry, config: &MapConfig, selection: &Selection) -> f64 {
    let highlighted = match selection {
        Selection::None => true,
        Selection::Service(id) => *id == service.id,
        Selection::Station(id) => service.stops.contains(id),
    };
    if highlighted {
        config.opacity.line_selected
    } else {
        config.opacity.line_dimmed
    }
}
