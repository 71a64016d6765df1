//! Arrow → JSON 레코드 변환 모듈
//!
//! Parquet에서 읽은 `RecordBatch`의 각 행을 컬럼 순서가 유지되는
//! JSON 객체로 변환합니다.

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{
    DataType, Float16Type, Float32Type, Float64Type, Int16Type, Int32Type, Int64Type, Int8Type,
    UInt16Type, UInt32Type, UInt64Type, UInt8Type,
};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use arrow::util::display::array_value_to_string;
use serde_json::{Map, Number, Value};
use std::sync::Arc;

/// 한 행에 해당하는 레코드 (컬럼 이름 → 값, 원본 컬럼 순서 유지)
pub type Record = Map<String, Value>;

/// pandas가 인덱스 보존용으로 추가하는 컬럼인지 확인
///
/// `__index_level_0__` 형태의 컬럼은 데이터가 아니므로 출력에서 제외합니다.
pub fn is_pandas_index(name: &str) -> bool {
    name.starts_with("__index_level_") && name.ends_with("__")
}

/// RecordBatch를 행 순서대로 레코드 목록으로 변환
pub fn batch_to_records(batch: &RecordBatch) -> Result<Vec<Record>, ArrowError> {
    let schema = batch.schema();

    let mut columns: Vec<(&str, ArrayRef)> = Vec::with_capacity(batch.num_columns());
    for (field, column) in schema.fields().iter().zip(batch.columns()) {
        if is_pandas_index(field.name()) {
            continue;
        }
        columns.push((field.name().as_str(), decode_dictionary(column)?));
    }

    let mut records = Vec::with_capacity(batch.num_rows());
    for row in 0..batch.num_rows() {
        let mut record = Map::with_capacity(columns.len());
        for (name, column) in &columns {
            record.insert((*name).to_string(), value_at(column.as_ref(), row)?);
        }
        records.push(record);
    }

    Ok(records)
}

/// 딕셔너리 인코딩 컬럼을 값 타입으로 한 번에 풀어둠
fn decode_dictionary(column: &ArrayRef) -> Result<ArrayRef, ArrowError> {
    match column.data_type() {
        DataType::Dictionary(_, value_type) => cast(column, value_type),
        _ => Ok(Arc::clone(column)),
    }
}

/// 배열의 한 원소를 JSON 값으로 변환
///
/// 숫자, 문자열, 불리언, 리스트, 구조체는 대응하는 JSON 타입으로,
/// 날짜/시간/Decimal/바이너리 등 나머지는 Arrow 표시 형식의 문자열로 변환합니다.
pub fn value_at(array: &dyn Array, row: usize) -> Result<Value, ArrowError> {
    if array.is_null(row) {
        return Ok(Value::Null);
    }

    let value = match array.data_type() {
        DataType::Null => Value::Null,
        DataType::Boolean => Value::Bool(array.as_boolean().value(row)),

        DataType::Int8 => array.as_primitive::<Int8Type>().value(row).into(),
        DataType::Int16 => array.as_primitive::<Int16Type>().value(row).into(),
        DataType::Int32 => array.as_primitive::<Int32Type>().value(row).into(),
        DataType::Int64 => array.as_primitive::<Int64Type>().value(row).into(),
        DataType::UInt8 => array.as_primitive::<UInt8Type>().value(row).into(),
        DataType::UInt16 => array.as_primitive::<UInt16Type>().value(row).into(),
        DataType::UInt32 => array.as_primitive::<UInt32Type>().value(row).into(),
        DataType::UInt64 => array.as_primitive::<UInt64Type>().value(row).into(),

        DataType::Float16 => float(f64::from(array.as_primitive::<Float16Type>().value(row))),
        DataType::Float32 => float(f64::from(array.as_primitive::<Float32Type>().value(row))),
        DataType::Float64 => float(array.as_primitive::<Float64Type>().value(row)),

        DataType::Utf8 => Value::String(array.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => Value::String(array.as_string::<i64>().value(row).to_string()),
        DataType::Utf8View => Value::String(array.as_string_view().value(row).to_string()),

        DataType::List(_) => list(array.as_list::<i32>().value(row))?,
        DataType::LargeList(_) => list(array.as_list::<i64>().value(row))?,
        DataType::FixedSizeList(_, _) => list(array.as_fixed_size_list().value(row))?,

        DataType::Struct(_) => {
            let array = array.as_struct();
            let mut object = Map::with_capacity(array.num_columns());
            for (field, child) in array.fields().iter().zip(array.columns()) {
                object.insert(field.name().clone(), value_at(child.as_ref(), row)?);
            }
            Value::Object(object)
        }

        // 중첩된 딕셔너리는 해당 행만 잘라서 풀어냄
        DataType::Dictionary(_, value_type) => {
            let decoded = cast(&array.slice(row, 1), value_type)?;
            value_at(decoded.as_ref(), 0)?
        }

        _ => Value::String(array_value_to_string(array, row)?),
    };

    Ok(value)
}

/// NaN/무한대는 JSON으로 표현할 수 없으므로 null 처리
fn float(value: f64) -> Value {
    Number::from_f64(value).map_or(Value::Null, Value::Number)
}

fn list(values: ArrayRef) -> Result<Value, ArrowError> {
    (0..values.len())
        .map(|i| value_at(values.as_ref(), i))
        .collect::<Result<Vec<_>, _>>()
        .map(Value::Array)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{
        BooleanArray, Date32Array, DictionaryArray, Float64Array, Int32Array, Int64Array,
        ListArray, StringArray, StructArray,
    };
    use arrow::datatypes::Field;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn batch(columns: Vec<(&str, ArrayRef)>) -> RecordBatch {
        RecordBatch::try_from_iter(columns).unwrap()
    }

    #[test]
    fn test_simple_rows_keep_column_order() {
        let batch = batch(vec![
            ("name", Arc::new(StringArray::from(vec!["Alice", "Bob"])) as ArrayRef),
            ("age", Arc::new(Int64Array::from(vec![25, 30])) as ArrayRef),
        ]);

        let records = batch_to_records(&batch).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(Value::Object(records[0].clone()), json!({"name": "Alice", "age": 25}));
        assert_eq!(Value::Object(records[1].clone()), json!({"name": "Bob", "age": 30}));

        let keys: Vec<&String> = records[0].keys().collect();
        assert_eq!(keys, vec!["name", "age"]);
        assert_eq!(
            serde_json::to_string(&records[0]).unwrap(),
            r#"{"name":"Alice","age":25}"#
        );
    }

    #[test]
    fn test_nulls_and_non_finite_floats() {
        let batch = batch(vec![
            (
                "active",
                Arc::new(BooleanArray::from(vec![Some(true), None])) as ArrayRef,
            ),
            (
                "score",
                Arc::new(Float64Array::from(vec![f64::NAN, 1.5])) as ArrayRef,
            ),
        ]);

        let records = batch_to_records(&batch).unwrap();
        assert_eq!(
            Value::Object(records[0].clone()),
            json!({"active": true, "score": null})
        );
        assert_eq!(
            Value::Object(records[1].clone()),
            json!({"active": null, "score": 1.5})
        );
    }

    #[test]
    fn test_pandas_index_column_is_skipped() {
        let batch = batch(vec![
            ("id", Arc::new(Int32Array::from(vec![7])) as ArrayRef),
            ("__index_level_0__", Arc::new(Int64Array::from(vec![0])) as ArrayRef),
        ]);

        let records = batch_to_records(&batch).unwrap();
        assert_eq!(Value::Object(records[0].clone()), json!({"id": 7}));
    }

    #[test]
    fn test_nested_list_and_struct() {
        let tags = ListArray::from_iter_primitive::<Int32Type, _, _>(vec![
            Some(vec![Some(1), Some(2)]),
            Some(vec![]),
        ]);
        let user = StructArray::from(vec![
            (
                Arc::new(Field::new("city", DataType::Utf8, false)),
                Arc::new(StringArray::from(vec!["서울", "Tokyo"])) as ArrayRef,
            ),
            (
                Arc::new(Field::new("zip", DataType::Int32, true)),
                Arc::new(Int32Array::from(vec![Some(100), None])) as ArrayRef,
            ),
        ]);
        let batch = batch(vec![
            ("tags", Arc::new(tags) as ArrayRef),
            ("user", Arc::new(user) as ArrayRef),
        ]);

        let records = batch_to_records(&batch).unwrap();
        assert_eq!(
            Value::Object(records[0].clone()),
            json!({"tags": [1, 2], "user": {"city": "서울", "zip": 100}})
        );
        assert_eq!(
            Value::Object(records[1].clone()),
            json!({"tags": [], "user": {"city": "Tokyo", "zip": null}})
        );
    }

    #[test]
    fn test_dictionary_column_is_decoded() {
        let colors: DictionaryArray<Int32Type> = vec!["red", "blue", "red"].into_iter().collect();
        let batch = batch(vec![("color", Arc::new(colors) as ArrayRef)]);

        let records = batch_to_records(&batch).unwrap();
        let values: Vec<&Value> = records.iter().map(|r| &r["color"]).collect();
        assert_eq!(values, vec![&json!("red"), &json!("blue"), &json!("red")]);
    }

    #[test]
    fn test_date_falls_back_to_display_string() {
        let batch = batch(vec![(
            "day",
            Arc::new(Date32Array::from(vec![19723])) as ArrayRef,
        )]);

        let records = batch_to_records(&batch).unwrap();
        assert_eq!(records[0]["day"], json!("2024-01-01"));
    }

    #[test]
    fn test_is_pandas_index() {
        assert!(is_pandas_index("__index_level_0__"));
        assert!(is_pandas_index("__index_level_12__"));
        assert!(!is_pandas_index("index"));
        assert!(!is_pandas_index("__index_level_0"));
    }
}
