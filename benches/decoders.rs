// benches/decoders.rs
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use gatt_scrape::config::sections;
use gatt_scrape::specs::{entity, html_table, script_table};
use gatt_scrape::Page;

fn listing(rows: usize) -> String {
    let mut body = String::from("<html><body><table id=\"gattTable\"><tbody>");
    for i in 0..rows {
        body.push_str(&format!(
            "<tr><td>Entity {i}</td><td>org.bluetooth.characteristic.entity_{i}</td><td>0x{:04X}</td></tr>",
            0x2A00 + i
        ));
    }
    body.push_str("</tbody></table></body></html>");
    body
}

fn script(rows: usize) -> String {
    let data: Vec<[String; 3]> = (0..rows)
        .map(|i| [format!("0x{:04X}", 0x2700 + i), format!("unit {i}"), format!("org.bluetooth.unit.u{i}")])
        .collect();
    format!(
        "<script>$('#t').DataTable({{\n data: {},\n}});</script>",
        serde_json::to_string(&data).unwrap()
    )
}

const ENTITY: &str = r#"<Characteristic><Value>
  <Field name="Flags"><Format>8bit</Format><BitField>
    <Bit index="0" size="1" name="a"><Enumerations><Enumeration key="0" value="x"/><Enumeration key="1" value="Reserved for future use"/></Enumerations></Bit>
    <Bit index="1" size="2" name="b"><Enumerations><Reserved start="0" end="3"/></Enumerations></Bit>
  </BitField></Field>
  <Field name="Value"><Format>uint16</Format><Unit>org.bluetooth.unit.percentage</Unit></Field>
</Value></Characteristic>"#;

fn bench_decoders(c: &mut Criterion) {
    let chars = sections::find("characteristics").unwrap();
    let units = sections::find("units").unwrap();
    let html = Page { status: 200, body: listing(300), ..Default::default() };
    let js = Page { status: 200, body: script(300), ..Default::default() };

    c.bench_function("html_table_300", |b| {
        b.iter(|| black_box(html_table::decode(black_box(&html), chars).len()))
    });

    c.bench_function("script_table_300", |b| {
        b.iter(|| black_box(script_table::decode(black_box(&js), units).len()))
    });

    c.bench_function("entity_fields", |b| {
        b.iter(|| black_box(entity::decode_fields(black_box(ENTITY)).map(|f| f.len())))
    });
}

criterion_group!(benches, bench_decoders);
criterion_main!(benches);
