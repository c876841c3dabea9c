use crate::config::DataConfig;
use crate::datasets::store::DatasetStore;
use crate::error::SmogwatchError;
use crate::stations::metadata_index::MetadataIndex;
use crate::types::pollutant::Pollutant;
use log::info;

/// Everything the handlers read. Built once at start-up and shared behind an `Arc`;
/// nothing in it is mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub store: DatasetStore,
    pub index: MetadataIndex,
}

impl AppState {
    pub fn new(store: DatasetStore, index: MetadataIndex) -> Self {
        Self { store, index }
    }

    /// Loads the station metadata and every pollutant dataset described by `config`.
    ///
    /// File reading runs on the blocking thread pool.
    ///
    /// # Errors
    ///
    /// Returns [`SmogwatchError::Metadata`] when the metadata file cannot be read; the
    /// dashboard cannot start without it. Unavailable pollutant datasets are not errors.
    pub async fn load(config: &DataConfig) -> Result<Self, SmogwatchError> {
        let config = config.clone();
        let state = tokio::task::spawn_blocking(move || {
            let index = MetadataIndex::load()
                .path(&config.metadata_path())
                .format(config.format)
                .station_column(&config.station_column)
                .location_column(&config.location_column)
                .call()?;

            let store = DatasetStore::open()
                .data_dir(&config.dir)
                .format(config.format)
                .time_column(&config.time_column)
                .call();

            Ok::<_, SmogwatchError>(Self::new(store, index))
        })
        .await??;

        info!(
            "{} of {} pollutant datasets available, {} locations",
            state.store.len(),
            Pollutant::ALL.len(),
            state.index.all_locations().len()
        );
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasets::dataset::fixtures::constant_dataset;
    use crate::datasets::loader::FileFormat;
    use polars::prelude::*;
    use std::error::Error;
    use std::fs::File;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_load_state() -> Result<(), Box<dyn Error>> {
        let dir = tempdir()?;
        let mut meta = df!(
            "kod_stacji" => ["S1", "S2"],
            "miejscowość" => ["Katowice", "Katowice"],
        )?;
        ParquetWriter::new(File::create(dir.path().join("metadata.parquet"))?).finish(&mut meta)?;
        let mut pm10 = constant_dataset(Pollutant::PM10, 2021, 2021, &[("S1", 30.0)])
            .frame()
            .clone();
        ParquetWriter::new(File::create(dir.path().join("PM10_24g_merged.parquet"))?)
            .finish(&mut pm10)?;

        let config = DataConfig {
            dir: dir.path().to_path_buf(),
            format: FileFormat::Parquet,
            metadata_file: "metadata.parquet".into(),
            ..Default::default()
        };
        let state = AppState::load(&config).await?;
        assert_eq!(state.store.len(), 1);
        assert_eq!(state.index.all_locations(), vec!["Katowice".to_string()]);
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_metadata_is_fatal() -> Result<(), Box<dyn Error>> {
        let dir = tempdir()?;
        let config = DataConfig {
            dir: dir.path().to_path_buf(),
            ..Default::default()
        };
        let err = AppState::load(&config).await.unwrap_err();
        assert!(matches!(err, SmogwatchError::Metadata(_)));
        Ok(())
    }

    #[cfg(feature = "netcdf")]
    #[tokio::test]
    async fn test_load_state_from_default_netcdf_layout() -> Result<(), Box<dyn Error>> {
        use crate::datasets::nc_reader::fixtures::{write_dataset, write_metadata};

        let dir = tempdir()?;
        write_metadata(
            &dir.path().join("metadata.nc"),
            "kod_stacji",
            "miejscowość",
            &[("SlKatoKossut", "Katowice"), ("SlGliwMewy", "Gliwice")],
        )?;
        write_dataset(
            &dir.path().join("SO2_24g_merged.nc"),
            "days since 2022-01-01",
            &[0.0, 1.0],
            &[("SlKatoKossut", vec![8.0, 9.0])],
        )?;

        let config = DataConfig {
            dir: dir.path().to_path_buf(),
            ..Default::default()
        };
        let state = AppState::load(&config).await?;
        assert_eq!(state.store.len(), 1);
        assert!(state.store.get(Pollutant::SO2).is_some());
        assert_eq!(
            state.index.all_locations(),
            vec!["Gliwice".to_string(), "Katowice".to_string()]
        );
        Ok(())
    }
}
