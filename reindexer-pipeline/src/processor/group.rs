//! Key-group folding over ordered rows.

use reindexer_shared::Identifiable;

/// Folds the rows of one key-group into one document.
///
/// `open` builds the document from the first row of a group, `accumulate`
/// is then called for every row of the group (the first one included), and
/// `close` runs once before the document is emitted.
pub trait GroupAggregator {
    type Row: Identifiable;
    type Output;

    fn open(&self, row: &Self::Row) -> Self::Output;

    fn accumulate(&self, document: &mut Self::Output, row: &Self::Row);

    fn close(&self, _document: &mut Self::Output) {}
}

/// The name an entity is indexed under: `name`, or `ascii_name` when the
/// source left `name` empty.
pub(crate) fn base_name<'a>(name: &'a str, ascii_name: &'a str) -> &'a str {
    if name.is_empty() {
        ascii_name
    } else {
        name
    }
}

/// Fold `rows`, ordered by key with each key's rows contiguous, into one
/// document per key, in key order.
pub fn fold_groups<A: GroupAggregator>(aggregator: &A, rows: &[A::Row]) -> Vec<A::Output> {
    let mut documents = Vec::new();
    let mut current: Option<(u64, A::Output)> = None;

    for row in rows {
        let key = row.id();

        if let Some((current_key, document)) = current.as_mut() {
            if *current_key == key {
                aggregator.accumulate(document, row);
                continue;
            }
        }

        if let Some((_, mut finished)) = current.take() {
            aggregator.close(&mut finished);
            documents.push(finished);
        }

        let mut document = aggregator.open(row);
        aggregator.accumulate(&mut document, row);
        current = Some((key, document));
    }

    if let Some((_, mut finished)) = current {
        aggregator.close(&mut finished);
        documents.push(finished);
    }

    documents
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row(u64, &'static str);

    impl Identifiable for Row {
        fn id(&self) -> u64 {
            self.0
        }
    }

    /// Collects the values of a group and marks it closed.
    struct Collect;

    impl GroupAggregator for Collect {
        type Row = Row;
        type Output = (u64, Vec<&'static str>, bool);

        fn open(&self, row: &Row) -> Self::Output {
            (row.0, Vec::new(), false)
        }

        fn accumulate(&self, document: &mut Self::Output, row: &Row) {
            document.1.push(row.1);
        }

        fn close(&self, document: &mut Self::Output) {
            document.2 = true;
        }
    }

    #[test]
    fn test_fold_groups_by_key() {
        let rows = vec![Row(1, "a"), Row(1, "b"), Row(2, "c"), Row(5, "d"), Row(5, "e")];

        let documents = fold_groups(&Collect, &rows);

        assert_eq!(
            documents,
            vec![
                (1, vec!["a", "b"], true),
                (2, vec!["c"], true),
                (5, vec!["d", "e"], true),
            ]
        );
    }

    #[test]
    fn test_fold_groups_empty() {
        assert!(fold_groups(&Collect, &[]).is_empty());
    }
}
