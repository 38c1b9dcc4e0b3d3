#![allow(dead_code)]

use std::io::{Cursor, Read, Write};
use zip::ZipArchive;
use zip::write::SimpleFileOptions;

pub const RESPONSE: &str = r#"### Nome do Aluno
Maria Silva

### Tema da Redação
Os desafios da mobilidade urbana no Brasil

### Data da Redação
12/03/2024

### Transcrição da Redação
A mobilidade urbana é um desafio das grandes cidades.
Os menino correu para pegar o ônibus lotado.

### Análise das Competências
#### Competência 1: Domínio da escrita formal
* **Nota estimada:** 160
* **Análise:** Poucos desvios gramaticais.
  - Concordância nominal e verbal
* **Trecho com erro:** "Os menino correu"

#### Competência 2: Compreensão da proposta
* **Nota estimada:** 200
* **Análise:** Tema plenamente desenvolvido.
* **Trecho com erro:** "insira aqui o trecho"

#### Competência 3: Argumentação
* **Nota estimada:** 160
* **Análise:** Argumentos consistentes.

#### Competência 4: Coesão
* **Nota estimada:** 180
* **Análise:** Bom uso de conectivos.

#### Competência 5: Proposta de intervenção
* **Nota estimada:** 180
* **Análise:** Proposta completa.

### Nota Estimada
880

### Comentários Gerais
Texto bem estruturado.
Revise a concordância.
"#;

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

fn p(text: &str) -> String {
    format!(r#"<w:p><w:r><w:t xml:space="preserve">{text}</w:t></w:r></w:p>"#)
}

fn cell(inner: &str) -> String {
    format!("<w:tc><w:tcPr><w:tcW w:w=\"2000\" w:type=\"dxa\"/></w:tcPr>{inner}</w:tc>")
}

/// A template exercising the placeholder layouts seen in real documents: plain runs, a token split
/// over three runs, a table with a nested table, the originality alert block and a header.
pub fn template_docx() -> Vec<u8> {
    let split = r#"<w:p><w:r><w:rPr><w:b/></w:rPr><w:t xml:space="preserve">Nota final: {{NOTA_</w:t></w:r><w:r><w:t>FIN</w:t></w:r><w:r><w:t>AL}}</w:t></w:r></w:p>"#;

    let mut rows = String::new();
    for id in 1..=5 {
        let nested = format!(
            "<w:tbl><w:tr>{}</w:tr></w:tbl>{}",
            cell(&p(&format!("{{{{ANALISE_C{id}}}}}"))),
            p("")
        );
        rows.push_str(&format!(
            "<w:tr>{}{}{}</w:tr>",
            cell(&p(&format!("Competência {id}"))),
            cell(&p(&format!("{{{{NOTA_C{id}}}}}"))),
            cell(&nested)
        ));
    }

    let body = [
        p("Relatório de {{NOME_ALUNO}}"),
        p("Tema: {{TEMA}}"),
        p("Data: {{DATA}}"),
        format!("<w:tbl>{rows}</w:tbl>"),
        split.to_string(),
        p("Alerta de Originalidade"),
        format!("<w:tbl><w:tr>{}</w:tr></w:tbl>", cell(&p("{{ALERTA_ORIGINALIDADE}}"))),
        p("{{COMENTARIOS}}"),
    ]
    .concat();

    let document = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="{W_NS}"><w:body>{body}<w:sectPr/></w:body></w:document>"#
    );
    let header = format!(r#"<w:hdr xmlns:w="{W_NS}">{}</w:hdr>"#, p("Aluno(a): {{NOME_ALUNO}}"));

    zip_parts(&[
        ("[Content_Types].xml", r#"<?xml version="1.0"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"/>"#),
        ("word/document.xml", &document),
        ("word/header1.xml", &header),
        ("word/media/ignored.txt", "{{NOME_ALUNO}}"),
    ])
}

pub fn zip_parts(parts: &[(&str, &str)]) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut zip = zip::ZipWriter::new(&mut buf);
        let options = SimpleFileOptions::default();
        for (name, content) in parts {
            zip.start_file(*name, options).unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }
        zip.finish().unwrap();
    }
    buf.into_inner()
}

pub fn read_part(docx: &[u8], name: &str) -> String {
    let mut archive = ZipArchive::new(Cursor::new(docx)).unwrap();
    let mut out = String::new();
    archive.by_name(name).unwrap().read_to_string(&mut out).unwrap();
    out
}
