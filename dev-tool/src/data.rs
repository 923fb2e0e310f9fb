use std::{collections::HashSet, fs::File, io::Read, path::Path};

use anyhow::{Context, Error};
use itertools::Itertools;
use log::debug;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use serde::de::DeserializeOwned;

use bookrank::{Chapter, Interaction, UserId};

/// Reads all records of a csv file with headers.
///
/// Columns which aren't part of the record are ignored.
pub(crate) fn read_records<T>(reader: impl Read) -> Result<Vec<T>, csv::Error>
where
    T: DeserializeOwned,
{
    csv::Reader::from_reader(reader).deserialize().collect()
}

fn load_records<T>(path: &Path) -> Result<Vec<T>, Error>
where
    T: DeserializeOwned,
{
    let file = File::open(path).with_context(|| format!("Opening {} failed.", path.display()))?;
    let records =
        read_records(file).with_context(|| format!("Parsing {} failed.", path.display()))?;
    debug!("loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Loads the interactions and the chapters catalog.
pub(crate) fn load_data(
    interactions: &Path,
    chapters: &Path,
) -> Result<(Vec<Interaction>, Vec<Chapter>), Error> {
    let interactions = load_records(interactions)?;
    let chapters = load_records(chapters)?;
    Ok((interactions, chapters))
}

/// Keeps the interactions of at most `size` distinct users drawn at random.
pub(crate) fn sample_users(
    interactions: Vec<Interaction>,
    size: usize,
    seed: u64,
) -> Vec<Interaction> {
    let users = interactions
        .iter()
        .map(|interaction| interaction.user_id)
        .unique()
        .collect::<Vec<_>>();
    if users.len() <= size {
        return interactions;
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let sampled = users
        .choose_multiple(&mut rng, size)
        .copied()
        .collect::<HashSet<UserId>>();
    debug!("sampled {} of {} users", sampled.len(), users.len());

    interactions
        .into_iter()
        .filter(|interaction| sampled.contains(&interaction.user_id))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use bookrank::{AuthorId, BookId, ChapterId};

    use super::*;

    #[test]
    fn test_read_interactions() {
        let csv = "user_id,book_id,chapter_id,timestamp\n1,10,100,2021\n2,20,200,2022\n";
        let interactions = read_records::<Interaction>(csv.as_bytes()).unwrap();

        assert_eq!(
            interactions,
            [
                Interaction::new(UserId(1), BookId(10), ChapterId(100)),
                Interaction::new(UserId(2), BookId(20), ChapterId(200)),
            ],
        );
    }

    #[test]
    fn test_read_chapters_with_missing_values() {
        let csv = "chapter_id,book_id,author_id,tags,chapter_sequence_no\n\
                   100,10,7,mystery|thriller,1\n\
                   101,10,7,,\n";
        let chapters = read_records::<Chapter>(csv.as_bytes()).unwrap();

        assert_eq!(chapters.len(), 2);
        assert_eq!(chapters[0].author_id, AuthorId(7));
        assert_eq!(chapters[0].tags.as_deref(), Some("mystery|thriller"));
        assert_eq!(chapters[0].chapter_sequence_no, Some(1));
        assert_eq!(chapters[1].tags, None);
        assert_eq!(chapters[1].chapter_sequence_no, None);
    }

    #[test]
    fn test_read_records_fails_on_missing_columns() {
        let csv = "user_id,book_id\n1,10\n";
        assert!(read_records::<Interaction>(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_load_data() {
        let mut interactions = tempfile::NamedTempFile::new().unwrap();
        writeln!(interactions, "user_id,book_id,chapter_id\n1,10,100").unwrap();
        let mut chapters = tempfile::NamedTempFile::new().unwrap();
        writeln!(chapters, "chapter_id,book_id,author_id,tags,chapter_sequence_no\n100,10,7,,1").unwrap();

        let (interactions, chapters) = load_data(interactions.path(), chapters.path()).unwrap();
        assert_eq!(interactions.len(), 1);
        assert_eq!(chapters.len(), 1);

        let missing = Path::new("does/not/exist.csv");
        assert!(load_data(missing, missing).is_err());
    }

    #[test]
    fn test_sample_users() {
        let interactions = (0..20)
            .flat_map(|user| {
                (0..3).map(move |book| {
                    Interaction::new(UserId(user), BookId(book), ChapterId(book * 10))
                })
            })
            .collect::<Vec<_>>();

        let sampled = sample_users(interactions.clone(), 5, 42);
        let users = sampled.iter().map(|i| i.user_id).collect::<HashSet<_>>();
        assert_eq!(users.len(), 5);
        assert_eq!(sampled.len(), 15);
        assert_eq!(sampled, sample_users(interactions.clone(), 5, 42));

        assert_eq!(sample_users(interactions.clone(), 20, 42), interactions);
    }
}
