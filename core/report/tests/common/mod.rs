//! FILENAME: tests/common/mod.rs
//! Fixtures for report pipeline integration tests.

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use engine::{decode_records, Order, Product, Provider};
use report::Artifact;
use serde_json::{json, Value};

/// Fixed generation time; relative time frames resolve against its date.
pub fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 15)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap()
}

fn acme() -> Value {
    json!({
        "id": 10,
        "nombre": "Ácme, S.A.",
        "contacto": "Laura Gómez",
        "email": "ventas@acme.test",
        "telefono": "555-0100",
        "calificacion": 4.8
    })
}

fn tornillos() -> Value {
    json!({ "id": 100, "nombre": "Tornillos", "categoria": "Ferretería", "precio": 2.5, "unidad": "caja" })
}

/// Five orders covering every status, a missing provider and a missing date.
pub fn sample_orders() -> Vec<Order> {
    let raw = vec![
        json!({
            "id": 1, "numero_pedido": "PED-001", "fecha_pedido": "2024-05-10",
            "estado": "recibido", "proveedor_id": 10, "proveedor": acme(),
            "producto_id": 100, "producto": tornillos(),
            "cantidad": 10, "precio_unitario": 2.5, "total": 25.0
        }),
        json!({
            "id": 2, "numero_pedido": "PED-002", "fecha_pedido": "2024-06-01",
            "estado": "pendiente", "proveedor_id": "11",
            "proveedor": { "id": 11, "nombre": "Beta Insumos", "calificacion": 4.2 },
            "producto_id": 101, "producto": { "id": 101, "nombre": "Cable", "precio": 50.0 },
            "cantidad": 3, "total": 150.0
        }),
        json!({
            "id": 3, "numero_pedido": "PED-003", "fecha_pedido": "2024-06-14T16:30:00",
            "estado": "recibido", "proveedor_id": 10, "proveedor": acme(),
            "producto_id": 100, "producto": tornillos(),
            "cantidad": 4, "precio_unitario": 2.5, "total": 10.0
        }),
        json!({
            "id": 4, "numero_pedido": "PED-004", "fecha_pedido": "2024-06-15",
            "estado": "cancelado", "producto_id": 102,
            "producto": { "id": 102, "nombre": "Pintura" },
            "total": 80.0
        }),
        json!({
            "id": 5, "numero_pedido": "PED-005", "estado": "enviado",
            "proveedor_id": 12, "proveedor": { "id": 12, "nombre": "Zeta", "calificacion": 0 },
            "total": "40"
        }),
    ];
    decode_records(&raw).unwrap()
}

/// Five providers; ratings 4.8, 4.2, 4.9, 3.0, 4.5 in input order.
pub fn sample_providers() -> Vec<Provider> {
    let raw = vec![
        json!({ "id": 1, "nombre": "Ácme", "categoria": "Ferretería", "calificacion": 4.8,
                "activo": true, "fecha_registro": "2023-01-10" }),
        json!({ "id": 2, "nombre": "beta", "categoria": "Eléctrico", "calificacion": 4.2,
                "activo": true, "fecha_registro": "2024-06-02" }),
        json!({ "id": 3, "nombre": "Zeta", "categoria": "Ferretería", "calificacion": 4.9,
                "activo": false }),
        json!({ "id": 4, "nombre": "Omega", "categoria": "Pintura", "calificacion": 3.0 }),
        json!({ "id": 5, "nombre": "Alfa", "categoria": "Eléctrico", "calificacion": 4.5,
                "activo": true }),
    ];
    decode_records(&raw).unwrap()
}

pub fn sample_products() -> Vec<Product> {
    let raw = vec![
        json!({ "id": 100, "nombre": "Tornillos", "categoria": "Ferretería", "precio": 2.5,
                "proveedor_id": 10, "stock": 500, "unidad": "caja" }),
        json!({ "id": 101, "nombre": "Cable", "categoria": "Eléctrico", "precio": 50.0,
                "proveedor_id": 11, "stock": 20 }),
        json!({ "id": 102, "nombre": "Pintura", "precio": 80.0 }),
    ];
    decode_records(&raw).unwrap()
}

/// CSV artifact body split into lines.
pub fn csv_lines(artifact: &Artifact) -> Vec<String> {
    String::from_utf8(artifact.bytes.clone())
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}
