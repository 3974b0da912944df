mod from_thrift;
mod to_thrift;

#[cfg(test)]
mod tests {
    use crate::error::Result;
    use crate::schema::types::ParquetType;
    use crate::schema::types::PhysicalType;
    use crate::schema::Repetition;

    #[test]
    fn round_trip() -> Result<()> {
        let leaves = vec![
            ParquetType::try_from_primitive(
                "id".to_string(),
                PhysicalType::Int32,
                Repetition::Required,
                None,
                None,
                None,
            )?,
            ParquetType::try_from_primitive(
                "name".to_string(),
                PhysicalType::ByteArray,
                Repetition::Optional,
                Some(crate::schema::types::PrimitiveConvertedType::Utf8),
                None,
                None,
            )?,
        ];
        let schema = ParquetType::new_root("schema".to_string(), leaves);

        let elements = schema.to_thrift();
        let refs = elements.iter().collect::<Vec<_>>();
        let result = ParquetType::try_from_thrift(&refs)?;

        assert_eq!(result, schema);
        Ok(())
    }

    #[test]
    fn round_trip_nested() -> Result<()> {
        let element = ParquetType::try_from_primitive(
            "element".to_string(),
            PhysicalType::Int64,
            Repetition::Optional,
            None,
            None,
            None,
        )?;
        let list = ParquetType::try_from_group(
            "numbers".to_string(),
            Repetition::Repeated,
            None,
            None,
            vec![element],
            None,
        )?;
        let schema = ParquetType::new_root("schema".to_string(), vec![list]);

        let elements = schema.to_thrift();
        let refs = elements.iter().collect::<Vec<_>>();
        let result = ParquetType::try_from_thrift(&refs)?;

        assert_eq!(result, schema);
        Ok(())
    }
}
