//! Cluster assignment.
//!
//! Pure function of (bundle, vector): scaler transform, nearest-centroid
//! assignment, label lookup. No side effects; identical inputs against the
//! same loaded artifacts always produce the same cluster id.

use serde::Serialize;

use crate::logic::artifacts::ArtifactBundle;
use crate::logic::features::FeatureVector;

/// Result of classifying one feature vector.
#[derive(Debug, Clone, Serialize)]
pub struct Assignment {
    pub cluster_id: u32,
    pub label: String,
}

/// Classify a raw vector into a hazard cluster.
pub fn assign(bundle: &ArtifactBundle, vector: &FeatureVector) -> Assignment {
    let scaled = bundle.scaler.transform(vector);
    let cluster_id = bundle.model.nearest_centroid(&scaled);
    let label = bundle.model.label_for(cluster_id).to_string();

    tracing::debug!(cluster_id, %label, "assigned vector {}", vector.to_log_entry());

    Assignment { cluster_id, label }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::artifacts::dataset::ReferenceDataset;
    use crate::logic::artifacts::model::KMeansModel;
    use crate::logic::artifacts::scaler::StandardScaler;
    use crate::logic::features::FEATURE_LAYOUT;
    use std::collections::BTreeMap;

    const DATASET_CSV: &str = "\
magnitude,depth,phasecount,azimuth_gap,location
5.0,10.0,30,120.0,Kabupaten Bantul
4.2,35.0,20,90.0,Sulawesi Barat
6.1,50.0,40,150.0,Laut Banda
";

    fn test_bundle() -> ArtifactBundle {
        let dataset = ReferenceDataset::from_reader(DATASET_CSV.as_bytes()).unwrap();
        let defaults = dataset.defaults().unwrap();
        ArtifactBundle {
            model: KMeansModel {
                n_clusters: 3,
                feature_names: FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect(),
                centroids: vec![
                    [-1.0, -1.0, -1.0, -1.0],
                    [0.0, 0.0, 0.0, 0.0],
                    [1.0, 1.0, 1.0, 1.0],
                ],
                labels: BTreeMap::from([
                    (0, "Risiko Rendah".to_string()),
                    (1, "Risiko Sedang".to_string()),
                    (2, "Risiko Tinggi".to_string()),
                ]),
                unknown_label: "Tidak diketahui".to_string(),
            },
            scaler: StandardScaler {
                feature_names: FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect(),
                mean: [5.0, 30.0, 30.0, 120.0],
                scale: [1.0, 20.0, 10.0, 30.0],
            },
            dataset,
            defaults,
        }
    }

    #[test]
    fn test_assign_is_deterministic() {
        let bundle = test_bundle();
        let vector = FeatureVector::build(&bundle.defaults, 5.0, 10.0, None, None);

        let first = assign(&bundle, &vector);
        let second = assign(&bundle, &vector);
        assert_eq!(first.cluster_id, second.cluster_id);
        assert_eq!(first.label, second.label);
    }

    #[test]
    fn test_assign_example_scenario() {
        // magnitude=5.0, depth=10.0, phasecount/azimuth at dataset medians:
        // scaled vector is (0, -1, 0, 0), nearest of the three centroids is
        // the origin.
        let bundle = test_bundle();
        let vector = FeatureVector::build(&bundle.defaults, 5.0, 10.0, None, None);

        let assignment = assign(&bundle, &vector);
        assert_eq!(assignment.cluster_id, 1);
        assert_eq!(assignment.label, "Risiko Sedang");
        assert!(assignment.cluster_id < bundle.model.n_clusters as u32);
    }

    #[test]
    fn test_assign_extremes_stay_in_configured_clusters() {
        let bundle = test_bundle();
        for (magnitude, depth, phasecount, azimuth_gap) in [
            (0.0, 0.0, 0, 0.0),
            (10.0, 700.0, 200, 360.0),
            (5.0, 350.0, 100, 180.0),
        ] {
            let vector = FeatureVector::build(
                &bundle.defaults,
                magnitude,
                depth,
                Some(phasecount),
                Some(azimuth_gap),
            );
            let assignment = assign(&bundle, &vector);
            assert!((assignment.cluster_id as usize) < bundle.model.n_clusters);
            assert!(bundle.model.labels.contains_key(&assignment.cluster_id));
        }
    }

    #[test]
    fn test_unknown_cluster_maps_to_sentinel() {
        let mut bundle = test_bundle();
        // A label table that no longer covers cluster 2
        bundle.model.labels.remove(&2);

        // Extreme inputs land on the (1, 1, 1, 1) centroid, cluster 2
        let vector = FeatureVector::build(&bundle.defaults, 10.0, 700.0, Some(200), Some(360.0));
        let assignment = assign(&bundle, &vector);
        assert_eq!(assignment.cluster_id, 2);
        assert_eq!(assignment.label, "Tidak diketahui");
    }
}
