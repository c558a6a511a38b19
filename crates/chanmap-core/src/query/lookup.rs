use crate::{
    index::KeyTuple,
    map::ChannelMap,
    query::{DetectorElements, LookupError, Record},
    row::RowId,
};

impl ChannelMap {
    /// Look a row up by its key column values.
    ///
    /// Key columns left out of `elements` keep the sentinel value, so a
    /// sparse query only matches rows whose omitted keys were zero.
    pub fn lookup_by_detector_elements(
        &self,
        elements: &DetectorElements,
    ) -> Result<Record, LookupError> {
        let mut key = KeyTuple::EMPTY;

        for (name, value) in elements.iter() {
            let column = self
                .schema()
                .get(name)
                .ok_or_else(|| LookupError::UnknownColumn(name.to_string()))?;

            if let Some(ordinal) = column.key_ordinal {
                let v = value.try_int().map_err(|source| LookupError::KeyKind {
                    column: name.to_string(),
                    source,
                })?;
                key.set(ordinal, v);
            }
        }

        Ok(self
            .primary
            .get(&key)
            .map_or_else(Record::invalid, |id| self.record(id)))
    }

    /// Look a row up by its reverse key (logical channel).
    #[must_use]
    pub fn lookup_by_channel(&self, channel: i64) -> Record {
        self.reverse
            .get(&channel)
            .map_or_else(Record::invalid, |id| self.record(id))
    }

    fn record(&self, id: RowId) -> Record {
        self.rows.get(id).map_or_else(Record::invalid, |row| {
            Record::materialize(self.schema(), row, self.reverse_column)
        })
    }
}
