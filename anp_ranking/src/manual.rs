/*!

This is the long-form manual for `anp_ranking` and `anprank`.

## Input table

The first column holds the name of each alternative (a candidate location).
The columns of the criteria are found from their header, ignoring case: a
header matches a criterion if it contains its code (`C1` .. `C5`) or one of
its aliases. The first matching header is used, and a header taken by one
criterion is not offered to the following ones. Rows that are entirely
empty are skipped. If a criterion has no column, the analysis stops with an
`incomplete criteria` error naming the missing criteria.

| Code | Criterion                 | Direction | Aliases                                             |
|------|---------------------------|-----------|-----------------------------------------------------|
| C1   | Rental cost               | cost      | sewa, rent, harga sewa                              |
| C2   | Sales volume              | benefit   | penjualan, jual, omzet, pendapatan, sales, revenue  |
| C3   | Raw material availability | benefit   | bahan, baku, material, supply                       |
| C4   | Facilities                | benefit   | fasilitas, facilit, sarana                          |
| C5   | Competition               | cost      | persaingan, saing, kompetitor, competit             |

## Scores

Every cell becomes a score between 1 (worst) and 5 (best). A cell that is
already a number between 1 and 5 is used as is, for any criterion.

**Rental cost.** The amount is read from the text. Several numbers are
averaged (`2-3 juta` is 2.5 million). `ribu`/`rb` multiply by a thousand,
`juta`/`jt` by a million, `miliar`/`milyar` by a billion. "." and "," are
read as thousands separators when followed by exactly three digits
(`Rp 1.500.000`), as decimal marks otherwise (`1,5 juta`).

| Yearly rent       | Score |
|-------------------|-------|
| below 1 million   | 5     |
| below 2 million   | 4     |
| below 4 million   | 3     |
| below 7 million   | 2     |
| 7 million or more | 1     |

Without an amount, the phrases `gratis`, `sangat murah` (5), `sangat mahal`
(1), `murah` (4), `sedang` (3) and `mahal` (2) are recognized. Anything else
scores 1: an unknown rent is penalized.

**Sales volume.** The daily number of portions, read like the rent.
`kodi` counts 20, `lusin` 12, `ribu` a thousand.

| Daily sales   | Score |
|---------------|-------|
| below 15      | 1     |
| below 50      | 2     |
| below 100     | 3     |
| below 150     | 4     |
| 150 or more   | 5     |

**Raw material availability.** Phrases, the first match wins: `tidak` with
`sulit` (4), `agak sulit` (2), `sulit` (1), `langka` (1), `sangat mudah` (5),
`melimpah` (5), `cukup mudah` (4), `mudah` (3). The default is 3.

**Facilities.** The comma-separated items are counted; `tidak ada`, `none`,
`-`, `nihil` and `kosong` count as nothing. 0 items score 1, 1 item 2, 2 items
3, 3 items 4, more 5. An item starting with `tidak`, `tanpa`, `belum` or
`no` is absent and does not count. A connection (`wifi`, `wi-fi`,
`internet`) that is present always scores 5, so `tidak ada wifi` scores 1.

**Competition.** Phrases, the first match wins: `belum ada` (5), `tidak ada`
(5), `tidak` with `ketat` (4), `tidak` with `mempengaruhi` (4), `ketat` (1),
`sangat mempengaruhi` (2), `banyak` (2), `cukup` (3), `sedikit` (4), `tidak`
(4), `belum` (5). The default is 2.

## Local priorities

Under each criterion, the alternatives are compared pairwise. The gap
between two scores, rounded, gives the intensity of the preference on the
Saaty scale: 0 -> 1, 1 -> 3, 2 -> 5, 3 -> 7, 4 -> 9. The priority vector of
the comparison matrix is approximated by averaging its normalized columns.
The consistency index is `(lambda_max - n) / (n - 1)` and the consistency
ratio divides it by the random index of the matrix size. A ratio below 0.1
is reported as `Valid`, otherwise as `Low consistency`. Inconsistent
matrices are still used.

## Criteria network

The weights of the criteria come from two sets of judgments:

- the outer judgments compare all the criteria with each other;
- an inner dependence describes which criteria influence another one. In
  the reference network, sales volume (C2) depends on rent (C1), facilities
  (C4) and competition (C5), with competition weighing the most.

The supermatrix has one column per criterion. Each column holds the outer
priorities, except the column of C2 which holds the inner priorities of C1,
C4 and C5 and zero elsewhere. All columns sum to 1. The supermatrix is
raised to successive powers (at most 100) until it stops changing; the
columns of the limit are averaged and normalized into the global weights.

Both sets of judgments can be replaced in the configuration file, and more
than one inner dependence may be declared (at most one per target
criterion).

## Configuration

`anprank` reads an optional JSON configuration (`--config`). All the fields
are optional:

```json
{
  "outputSettings": { "analysisName": "Warung 2024", "outputFile": "result.json" },
  "inputSource": { "provider": "csv", "filePath": "lokasi.csv", "delimiter": ";" },
  "criteria": [ { "id": "C1", "aliases": ["sewa", "biaya tempat"] } ],
  "network": {
    "outerJudgments": [ { "row": "C2", "column": "C1", "intensity": 2 } ],
    "innerDependencies": [
      { "target": "C2", "sources": ["C1", "C4", "C5"],
        "judgments": [ { "row": "C5", "column": "C1", "intensity": 3 } ] }
    ],
    "limitPower": 100
  },
  "consistencyThreshold": 0.1
}
```

Judgments not listed are taken as equal importance. Relative paths are
resolved against the directory of the configuration file.

## Input formats

* `csv`: the separator is `;`, or `,` if the header has a single column with
  `;`. `--delimiter` forces a separator.
* `excel`: `.xlsx`, `.xls`, `.xlsm` and `.ods` workbooks. The first
  worksheet is used, unless `--excel-worksheet-name` is given.

The type is inferred from the file extension when `--input-type` is not
given.

## Revenue projection

With `--revenue`, the output also contains a projection of the yearly
revenue of each alternative: its sales column read as a monthly amount of
rupiah (`50 juta`, `Rp 5.000.000`), times 12.

*/
