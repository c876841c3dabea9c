//! The set of pollutant datasets kept resident for the lifetime of the process.

use crate::datasets::dataset::{Dataset, DEFAULT_TIME_COLUMN};
use crate::datasets::error::DatasetError;
use crate::datasets::loader::{read_frame, FileFormat};
use crate::types::pollutant::Pollutant;
use bon::bon;
use log::{info, warn};
use std::collections::BTreeMap;
use std::path::Path;

/// Immutable store of every pollutant dataset that could be opened at start-up.
///
/// Pollutants whose file is missing or unreadable are simply absent; there is no
/// placeholder and no reload. A changed file on disk requires a restart.
///
/// # Examples
///
/// ```no_run
/// use smogwatch::{DatasetStore, Pollutant};
/// use std::path::Path;
///
/// let store = DatasetStore::open().data_dir(Path::new("data")).call();
/// if let Some(pm10) = store.get(Pollutant::PM10) {
///     println!("PM10 has {} stations", pm10.stations().len());
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct DatasetStore {
    datasets: BTreeMap<Pollutant, Dataset>,
}

#[bon]
impl DatasetStore {
    /// Attempts to load the dataset of every pollutant in `pollutants` (all known pollutants
    /// by default) from `data_dir`.
    ///
    /// Failures never abort: a missing file is logged at `info`, an unreadable one at `warn`,
    /// and the pollutant is left unavailable.
    ///
    /// # Arguments
    ///
    /// * `.data_dir(&Path)`: **Required.** Directory holding `{pollutant}_24g_merged.{ext}` files.
    /// * `.format(FileFormat)`: Optional. Defaults to [`FileFormat::NetCdf`].
    /// * `.time_column(&str)`: Optional. Defaults to `"Data"`.
    /// * `.pollutants(Vec<Pollutant>)`: Optional. Defaults to [`Pollutant::ALL`].
    #[builder]
    pub fn open(
        data_dir: &Path,
        format: Option<FileFormat>,
        time_column: Option<&str>,
        pollutants: Option<Vec<Pollutant>>,
    ) -> Self {
        let format = format.unwrap_or_default();
        let time_column = time_column.unwrap_or(DEFAULT_TIME_COLUMN);
        let pollutants = pollutants.unwrap_or_else(|| Pollutant::ALL.to_vec());

        let mut datasets = BTreeMap::new();
        for pollutant in pollutants {
            match Self::load(data_dir, pollutant, format, time_column) {
                Ok(dataset) => {
                    info!(
                        "Loaded {} ({} stations, {} timestamps)",
                        pollutant,
                        dataset.stations().len(),
                        dataset.height()
                    );
                    datasets.insert(pollutant, dataset);
                }
                Err(DatasetError::MissingFile(path)) => {
                    info!("No dataset for {} at {:?}, skipping", pollutant, path);
                }
                Err(e) => {
                    warn!("Failed to open dataset for {}: {}", pollutant, e);
                }
            }
        }

        Self { datasets }
    }
}

impl DatasetStore {
    /// Loads a single pollutant's dataset from `data_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::MissingFile`] when the file does not exist,
    /// [`DatasetError::Read`] when it cannot be parsed, and the errors of [`Dataset::new`]
    /// when it lacks the expected shape.
    pub fn load(
        data_dir: &Path,
        pollutant: Pollutant,
        format: FileFormat,
        time_column: &str,
    ) -> Result<Dataset, DatasetError> {
        let path = data_dir.join(format!(
            "{}.{}",
            pollutant.dataset_file_stem(),
            format.extension()
        ));
        if !path.is_file() {
            return Err(DatasetError::MissingFile(path));
        }

        let frame = read_frame(&path, format).map_err(|e| DatasetError::Read(path.clone(), e))?;
        Dataset::new(pollutant, frame, time_column)
    }

    /// Builds a store from datasets that are already in memory.
    pub fn from_datasets(datasets: impl IntoIterator<Item = Dataset>) -> Self {
        Self {
            datasets: datasets
                .into_iter()
                .map(|dataset| (dataset.pollutant(), dataset))
                .collect(),
        }
    }

    pub fn get(&self, pollutant: Pollutant) -> Option<&Dataset> {
        self.datasets.get(&pollutant)
    }

    /// Like [`DatasetStore::get`], for a pollutant name taken from a request.
    pub fn get_by_name(&self, name: &str) -> Option<&Dataset> {
        name.parse::<Pollutant>()
            .ok()
            .and_then(|pollutant| self.get(pollutant))
    }

    /// Loaded datasets in pollutant display order.
    pub fn available(&self) -> impl Iterator<Item = &Dataset> {
        self.datasets.values()
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}
